#![no_main]

use libfuzzer_sys::fuzz_target;

use runway_core::{GrowthModel, GrowthParams};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(params) = GrowthParams::from_json(text) else {
        return;
    };

    // Should not panic; valid models must snapshot idempotently.
    if let Ok(model) = GrowthModel::create(params) {
        let snap = model.to_params();
        let rebuilt = GrowthModel::create(snap.clone()).expect("snapshot must reload");
        assert_eq!(rebuilt.to_params(), snap);
    }
});
