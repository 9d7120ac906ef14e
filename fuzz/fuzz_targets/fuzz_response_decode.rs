//! Arbitrary datagrams against the ack validator, both BVLC modes.

#![no_main]

use bacpoll_core::{
    build_requests, decode_read_property_ack_with, BvlcCheck, DecodeOptions, ObjectType,
    PropertySpec,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(props) = [
        PropertySpec::new("A001", ObjectType::AnalogValue, 1),
        PropertySpec::new("D169", ObjectType::BinaryValue, 169),
    ]
    .into_iter()
    .collect::<Result<Vec<_>, _>>() else {
        return;
    };
    let Ok(set) = build_requests(props) else {
        return;
    };
    for bvlc_check in [BvlcCheck::Lenient, BvlcCheck::Strict] {
        let _ = decode_read_property_ack_with(data, set.pending(), DecodeOptions { bvlc_check });
    }
});
