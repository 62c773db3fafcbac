//! Opened embedded workbooks, keyed by the part that holds them.
//!
//! Many charts of one presentation usually share a single embedded workbook.
//! The cache makes sure each is opened and parsed at most once for as long as
//! the owning presentation lives. It uses `RefCell`, so it is neither `Sync`
//! nor usable from several threads without a wrapper of the caller's choice.
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::{debug, trace};

use crate::ooxml::charts::workbook::EmbeddedWorkbook;
use crate::ooxml::error::Result;
use crate::ooxml::opc::PackURI;

#[derive(Debug, Default)]
pub struct WorkbookCache {
    entries: RefCell<HashMap<PackURI, Rc<EmbeddedWorkbook>>>,
}

impl WorkbookCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the workbook stored for `identity`, calling `open` only when
    /// there is none yet. A failed open stores nothing.
    pub fn get_or_open<F>(&self, identity: &PackURI, open: F) -> Result<Rc<EmbeddedWorkbook>>
    where
        F: FnOnce() -> Result<EmbeddedWorkbook>,
    {
        if let Some(workbook) = self.entries.borrow().get(identity) {
            trace!("embedded workbook {} served from cache", identity);
            return Ok(Rc::clone(workbook));
        }

        let workbook = Rc::new(open()?);
        debug!(
            "opened embedded workbook {} ({} sheets)",
            identity,
            workbook.worksheets().len()
        );
        self.entries
            .borrow_mut()
            .insert(identity.clone(), Rc::clone(&workbook));
        Ok(workbook)
    }

    pub fn contains(&self, identity: &PackURI) -> bool {
        self.entries.borrow().contains_key(identity)
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
