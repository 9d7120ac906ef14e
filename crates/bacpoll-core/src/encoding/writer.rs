use crate::EncodeError;

/// Appends into a caller-owned buffer, failing instead of growing.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Bytes written so far.
    pub const fn position(&self) -> usize {
        self.len
    }

    pub fn as_written(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn write_all(&mut self, data: &[u8]) -> Result<(), EncodeError> {
        let dst = self
            .buf
            .get_mut(self.len..self.len + data.len())
            .ok_or(EncodeError::BufferTooSmall)?;
        dst.copy_from_slice(data);
        self.len += data.len();
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), EncodeError> {
        self.write_all(&[value])
    }

    pub fn write_be_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    pub fn write_be_u32(&mut self, value: u32) -> Result<(), EncodeError> {
        self.write_all(&value.to_be_bytes())
    }

    /// Overwrites two already-written bytes at `offset`, for length fields
    /// that are only known once the frame is complete.
    pub fn patch_be_u16(&mut self, offset: usize, value: u16) -> Result<(), EncodeError> {
        let dst = self.buf[..self.len]
            .get_mut(offset..offset.saturating_add(2))
            .ok_or(EncodeError::BufferTooSmall)?;
        dst.copy_from_slice(&value.to_be_bytes());
        Ok(())
    }
}
