use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::sheet::SystemId;

use super::wedge::WedgeInter;

slotmap::new_key_type! {
    /// Unique identifier for an interpretation in the graph.
    pub struct InterId;
}

/// Destination of the symbols assembled on a page.
pub trait InterSink {
    /// Inserts `inter` into the graph of `system`.
    fn add_vertex(&mut self, system: SystemId, inter: WedgeInter) -> InterId;
}

/// Symbol interpretation graph of a page, vertices grouped by system.
#[derive(Debug, Default)]
pub struct Sig {
    inters: SlotMap<InterId, WedgeInter>,
    systems: BTreeMap<SystemId, Vec<InterId>>,
}

impl Sig {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn inter(&self, id: InterId) -> Option<&WedgeInter> {
        self.inters.get(id)
    }

    pub fn inters(&self) -> impl Iterator<Item = (InterId, &WedgeInter)> {
        self.inters.iter()
    }

    /// Inters of `system`, in insertion order.
    #[must_use]
    pub fn system_inters(&self, system: SystemId) -> &[InterId] {
        self.systems.get(&system).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inters.is_empty()
    }
}

impl InterSink for Sig {
    fn add_vertex(&mut self, system: SystemId, inter: WedgeInter) -> InterId {
        let id = self.inters.insert(inter);
        self.systems.entry(system).or_default().push(id);
        id
    }
}
