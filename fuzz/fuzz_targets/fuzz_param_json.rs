#![no_main]

use libfuzzer_sys::fuzz_target;
use sheetforge_spec::validation::{validate_params, validate_pixelate_params};
use sheetforge_spec::{AssembleParam, PixelateParam};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(param) = AssembleParam::from_json(json) {
        let _ = validate_params(&param);
        if let Ok(round_trip) = param.to_json_pretty() {
            let _ = serde_json::from_str::<serde_json::Value>(&round_trip);
        }
    }

    if let Ok(param) = PixelateParam::from_json(json) {
        let _ = validate_pixelate_params(&param);
    }
});
