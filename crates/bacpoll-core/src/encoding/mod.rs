/// Zero-copy byte reader for decoding BACnet frames.
pub mod reader;
/// One-octet BACnet tag encoding (context, opening/closing, application).
pub mod tag;
/// Byte writer for encoding BACnet frames into a caller-owned buffer.
pub mod writer;
