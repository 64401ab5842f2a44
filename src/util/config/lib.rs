/* ************************************************************************ **
** This file is part of toyla, and is licensed under EITHER the MIT license **
** or the Apache 2.0 license, at your option.                               **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// NOTE: Read config through the YamlRead trait, not serde_yaml directly,
//       so that typos in keys get reported.

#[macro_use] extern crate serde_derive;
#[macro_use] extern crate log;

pub use self::monomorphize::YamlRead;
#[macro_use]
mod monomorphize;

pub use self::settings::Settings;
mod settings;

#[doc(hidden)] // used by macro
pub mod reexports {
    pub use serde_ignored;
    pub use serde_yaml;
}

pub type FailResult<T> = Result<T, failure::Error>;
