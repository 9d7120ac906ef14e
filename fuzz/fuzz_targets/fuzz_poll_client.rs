//! Splits the input into datagrams and feeds them to a poll client; the
//! cursor must stay in range whatever arrives.

#![no_main]

use bacpoll_core::{DecodedSample, ObjectType, PollClient, PropertySpec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let props = (0..3).filter_map(|i| PropertySpec::new("p", ObjectType::AnalogValue, i).ok());
    let Ok(mut client) = PollClient::new(props, |_: DecodedSample<'_>| {}) else {
        return;
    };
    for datagram in data.split(|b| *b == 0xFF) {
        client.on_datagram(datagram, 0.0);
        assert!(client.current_request().is_some());
    }
});
