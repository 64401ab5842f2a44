/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

use crate::{FailResult, YamlRead};
use ::std::fs::File;
use ::std::path::Path;
use ::failure::ResultExt;
use ::toyla_range_check::RangeCheck;

/// Runtime settings.
///
/// ```yaml
/// range-check: disabled   # or enabled
/// ```
///
/// Every key is optional. A missing `range-check` falls back to the default
/// chosen by the `range-check` cargo feature.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub range_check: RangeCheck,
}
derive_yaml_read!{Settings}

impl Settings {
    pub fn from_path(path: impl AsRef<Path>) -> FailResult<Settings>
    {
        let path = path.as_ref();
        let file = File::open(path).with_context(|e| format!("{}: {}", path.display(), e))?;
        let settings = Settings::from_reader(file)?;
        debug!("Read settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }
}

#[cfg(test)]
#[deny(unused)]
mod tests {
    use super::*;
    use ::pretty_assertions::assert_eq;

    #[test]
    fn explicit_switch() {
        let settings = Settings::from_reader("range-check: disabled".as_bytes()).unwrap();
        assert_eq!(settings, Settings { range_check: RangeCheck::Disabled });

        let settings = Settings::from_reader("range-check: enabled\n".as_bytes()).unwrap();
        assert_eq!(settings, Settings { range_check: RangeCheck::Enabled });
    }

    #[test]
    fn missing_key_uses_default() {
        let settings = Settings::from_reader("{}".as_bytes()).unwrap();
        assert_eq!(settings.range_check, RangeCheck::default());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn unknown_keys_are_not_fatal() {
        let settings = Settings::from_reader("rang-check: disabled".as_bytes()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn bad_value() {
        assert!(Settings::from_reader("range-check: sometimes".as_bytes()).is_err());
        assert!(Settings::from_reader("range-check: [enabled]".as_bytes()).is_err());
    }

    #[test]
    fn missing_file() {
        let err = Settings::from_path("this/file/does/not/exist.yaml").unwrap_err();
        assert!(err.to_string().contains("exist.yaml"));
    }
}
