use super::*;

use proptest::prelude::*;

pub(super) fn reference_value(window: &[u8]) -> u64 {
    let mut fresh = RollingChecksum::new(window.len());
    fresh.update(window);
    fresh.value()
}

pub(super) fn data_and_window() -> impl Strategy<Value = (Vec<u8>, usize)> {
    prop::collection::vec(any::<u8>(), 1..=256).prop_flat_map(|data| {
        let len = data.len();
        (Just(data), 1..=len)
    })
}
