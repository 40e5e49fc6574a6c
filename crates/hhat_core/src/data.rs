// Copyright contributors to the hhat_lang project
// SPDX-License-Identifier: Apache-2.0

use std::fmt;

use smol_str::SmolStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataParadigm {
    Classical,
    Quantum,
}

/// A named classical or quantum value that is subject to lowering.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WorkingData {
    name: SmolStr,
    paradigm: DataParadigm,
}

impl WorkingData {
    /// The paradigm follows the name: quantum names start with `@`.
    pub fn new<T: AsRef<str>>(name: T) -> WorkingData {
        let name = SmolStr::new(name);
        let paradigm = if name.starts_with('@') {
            DataParadigm::Quantum
        } else {
            DataParadigm::Classical
        };
        WorkingData { name, paradigm }
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn paradigm(&self) -> DataParadigm {
        self.paradigm
    }

    pub fn is_quantum(&self) -> bool {
        self.paradigm == DataParadigm::Quantum
    }
}

impl fmt::Display for WorkingData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&hhat_ast::Id> for WorkingData {
    fn from(id: &hhat_ast::Id) -> WorkingData {
        WorkingData::new(id.name())
    }
}
