use std::fmt;

use crate::foundation::error::VlError;

/// One step of a JSON path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaPathElem {
    /// Object key.
    Key(String),
    /// Array index.
    Index(usize),
}

impl From<&str> for SchemaPathElem {
    fn from(key: &str) -> Self {
        SchemaPathElem::Key(key.to_owned())
    }
}

/// A single violation, located by its JSON path.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaError {
    /// Path from the instance root.
    pub path: Vec<SchemaPathElem>,
    /// What is wrong.
    pub message: String,
}

impl SchemaError {
    pub(crate) fn at(path: &[SchemaPathElem], message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            message: message.into(),
        }
    }

    /// Path rendered as `$.encoding.x.type`.
    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            return write!(f, "{}", self.message);
        }
        write!(f, "{}: {}", format_path(&self.path), self.message)
    }
}

fn format_path(path: &[SchemaPathElem]) -> String {
    let mut s = String::from("$");
    for p in path {
        match p {
            SchemaPathElem::Key(name) => {
                s.push('.');
                s.push_str(name);
            }
            SchemaPathElem::Index(i) => {
                s.push('[');
                s.push_str(&i.to_string());
                s.push(']');
            }
        }
    }
    s
}

/// Every violation found in one validation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaErrors {
    /// Violations in discovery order.
    pub errors: Vec<SchemaError>,
}

impl SchemaErrors {
    pub(crate) fn into_result(errors: Vec<SchemaError>) -> Result<(), SchemaErrors> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaErrors { errors })
        }
    }
}

impl fmt::Display for SchemaErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{e}")?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaErrors {}

impl From<SchemaErrors> for VlError {
    fn from(errs: SchemaErrors) -> Self {
        VlError::validation(errs.to_string())
    }
}
