//! Section accessor: the ordered sections of a snap container
//!
//! The section list is resolved once from the container's children. Layout
//! is never cached; every bounds query goes back to the host.

use std::collections::HashSet;

use crate::host::{ScrollHost, SectionBounds};
use crate::{Error, Result};

/// How scrolling behaves inside a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    /// Any scroll intent snaps to the neighbouring section
    Snap,
    /// Free scrolling until the viewport edge leaves the section
    Normal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub kind: SectionKind,
}

/// A section passed to snap hooks, with its live layout if it resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SectionHandle {
    pub index: usize,
    pub id: String,
    pub bounds: Option<SectionBounds>,
}

#[derive(Debug, Clone)]
pub struct SectionAccessor {
    sections: Vec<Section>,
}

impl SectionAccessor {
    /// Resolve the sections of `container_id`
    ///
    /// Children whose id is in `normal_ids` are free-scroll sections.
    pub fn resolve<H: ScrollHost + ?Sized>(host: &H, container_id: &str, normal_ids: &[String]) -> Result<Self> {
        let children = host
            .container_children(container_id)
            .ok_or_else(|| Error::ContainerNotFound(container_id.to_string()))?;
        Ok(Self::from_ids(children, normal_ids))
    }

    /// Build from an explicit id list
    pub fn from_ids<I, S>(ids: I, normal_ids: &[String]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let normal: HashSet<&str> = normal_ids.iter().map(String::as_str).collect();
        let sections = ids
            .into_iter()
            .map(|id| {
                let id = id.into();
                let kind = if normal.contains(id.as_str()) {
                    SectionKind::Normal
                } else {
                    SectionKind::Snap
                };
                Section { id, kind }
            })
            .collect();
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Whether the section at `index` is a free-scroll section
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn is_normal(&self, index: usize) -> bool {
        self.sections[index].kind == SectionKind::Normal
    }

    /// There is a section after `index`
    #[inline]
    pub fn can_advance(&self, index: usize) -> bool {
        index + 1 < self.sections.len()
    }

    /// There is a section before `index`
    #[inline]
    pub fn can_retreat(&self, index: usize) -> bool {
        index >= 1
    }

    /// Live layout of the section at `index`
    ///
    /// Returns `None` when the host cannot resolve the section's id.
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn bounds_of<H: ScrollHost + ?Sized>(&self, index: usize, host: &H) -> Option<SectionBounds> {
        host.layout_of(&self.sections[index].id)
    }

    /// Hook payload for the section at `index`
    pub fn handle<H: ScrollHost + ?Sized>(&self, index: usize, host: &H) -> Option<SectionHandle> {
        let section = self.sections.get(index)?;
        Some(SectionHandle {
            index,
            id: section.id.clone(),
            bounds: host.layout_of(&section.id),
        })
    }
}
