use std::collections::BTreeMap;

use crate::{MuscleGroup, Name};

/// Exercise names previously entered by the user, per muscle group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog(BTreeMap<MuscleGroup, Vec<String>>);

impl Catalog {
    #[must_use]
    pub fn names(&self, group: MuscleGroup) -> &[String] {
        self.0.get(&group).map_or(&[][..], Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, group: MuscleGroup, name: &str) -> bool {
        let name = name.to_lowercase();
        self.names(group).iter().any(|n| n.to_lowercase() == name)
    }

    /// Add a name unless the group already has one differing only in case.
    ///
    /// Returns whether the name was added.
    pub fn add(&mut self, group: MuscleGroup, name: &Name) -> bool {
        if self.contains(group, name.as_ref()) {
            return false;
        }
        self.0.entry(group).or_default().push(name.to_string());
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, &[String])> {
        self.0.iter().map(|(group, names)| (*group, names.as_slice()))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        std::iter::empty().collect()
    }
}

impl FromIterator<(MuscleGroup, Vec<String>)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (MuscleGroup, Vec<String>)>>(iter: T) -> Self {
        let mut all = MuscleGroup::iter()
            .map(|group| (*group, vec![]))
            .collect::<BTreeMap<_, _>>();
        all.extend(iter);
        Self(all)
    }
}
