/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

#![allow(non_snake_case)]

use failure::Error;

use std::io::Read;

/// Alternative to `serde_yaml::from_reader` that warns on unrecognized keys
/// through `serde_ignored`, instead of silently dropping them.
///
/// The deserialization code is monomorphized in the crate that invokes
/// `derive_yaml_read!`, not in the crates that read the type.
pub trait YamlRead: for <'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, Error> {
        // serde_ignored needs a Deserializer, and serde_yaml only gives us one
        // for Value. Errors from that route lack detail, so keep the text around
        // for a second attempt.
        let mut s = String::new();
        r.read_to_string(&mut s)?;

        let value = value_from_str(&s)?;

        match Self::__serde_ignored__from_value(value) {
            Ok(out) => Ok(out),
            // That error message was surely garbage. Re-parse from the string,
            // without serde_ignored, for a better one.
            Err(_) => Self::__serde_yaml__from_str(&s),
        }
    }

    // provided methods are monomorphized lazily, so the bodies live in the macro
    #[doc(hidden)]
    fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<Self, Error>;
    #[doc(hidden)]
    fn __serde_yaml__from_str(s: &str) -> Result<Self, Error>;
}

#[macro_export]
macro_rules! derive_yaml_read {
    ($Type:ty) => {
        const _: () = {
            use std::result::Result;
            use std::convert::Into;
            use $crate::reexports::serde_yaml;
            use $crate::reexports::serde_ignored;
            use failure::Error;
            use log::warn;

            impl $crate::YamlRead for $Type {
                fn __serde_ignored__from_value(value: serde_yaml::Value) -> Result<$Type, Error> {
                    serde_ignored::deserialize(
                        value,
                        |path| warn!("Unused config item (possible typo?): {}", path),
                    ).map_err(Into::into)
                }

                fn __serde_yaml__from_str(s: &str) -> Result<$Type, Error> {
                    serde_yaml::from_str(s)
                        .map_err(Into::into)
                }
            }
        };
    };
}

// parsed separately so the text survives for the fallback in from_dyn_reader
fn value_from_str(r: &str) -> Result<serde_yaml::Value, Error>
{ serde_yaml::from_str(r).map_err(Into::into) }
