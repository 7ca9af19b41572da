use crate::OutputFormat;
use anyhow::Result;
use mediacenter_browser::ProfileDirectory;
use serde_json::json;

/// Print the profile directory the host and external launches share
pub fn path(profile: &ProfileDirectory, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        let output = json!({
            "path": profile.path(),
            "exists": profile.exists(),
            "descriptor": profile.descriptor_path(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", profile.path().display());
    }

    Ok(())
}
