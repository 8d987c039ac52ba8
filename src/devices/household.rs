use crate::devices::appliance::Appliance;
use crate::devices::socket_group::SocketGroup;
use crate::devices::types::{ApplianceId, Priority};

/// Registry owning every appliance and the socket groups indexing them.
///
/// Groups are kept in order of first appearance so iteration, alerts and
/// reports are deterministic.
#[derive(Debug, Clone, Default)]
pub struct Household {
    appliances: Vec<Appliance>,
    groups: Vec<SocketGroup>,
}

impl Household {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an appliance and wires it into its socket group, creating
    /// the group on first use.
    pub fn add(&mut self, appliance: Appliance) -> ApplianceId {
        let id = self.appliances.len();
        match self.groups.iter_mut().find(|g| g.name() == appliance.group()) {
            Some(group) => group.add(id),
            None => {
                let mut group = SocketGroup::new(appliance.group());
                group.add(id);
                self.groups.push(group);
            }
        }
        self.appliances.push(appliance);
        id
    }

    /// Shorthand for [`Self::add`] with a freshly built [`Appliance`].
    pub fn add_new(
        &mut self,
        name: &str,
        location: &str,
        group: &str,
        rated_max_a: f64,
        priority: Priority,
    ) -> ApplianceId {
        self.add(Appliance::new(name, location, group, rated_max_a, priority))
    }

    pub fn appliances(&self) -> &[Appliance] {
        &self.appliances
    }

    pub fn appliances_mut(&mut self) -> &mut [Appliance] {
        &mut self.appliances
    }

    pub fn groups(&self) -> &[SocketGroup] {
        &self.groups
    }

    /// Splits the registry so groups can be evaluated against the appliances.
    pub fn split_mut(&mut self) -> (&[Appliance], &mut [SocketGroup]) {
        (&self.appliances, &mut self.groups)
    }

    pub fn group(&self, name: &str) -> Option<&SocketGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn len(&self) -> usize {
        self.appliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.appliances.is_empty()
    }
}
