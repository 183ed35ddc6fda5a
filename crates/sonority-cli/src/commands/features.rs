use anyhow::Result;

use sonority_core::Feature;

/// Print every comparable feature and its scale.
#[allow(clippy::unnecessary_wraps)]
pub fn list_features() -> Result<()> {
    println!("{:<18} scale", "feature");
    for feature in Feature::ALL {
        let scale = if feature.is_normalized() {
            "0 to 1"
        } else {
            "raw (not rescaled)"
        };
        println!("{:<18} {scale}", feature.as_str());
    }
    Ok(())
}
