//! Labeled point cloud types produced by ranging

/// A detected ion with its assigned species
///
/// The species is an index into the sorted species ordering of the
/// [LabeledCloud] that owns the atom, or `None` for ions whose mass
/// matched no range. Immutable once labeled.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LabeledAtom {
    /// x coordinate (nm)
    pub x: f64,
    /// y coordinate (nm)
    pub y: f64,
    /// z coordinate (nm)
    pub z: f64,
    /// Mass-to-charge ratio (Da)
    pub mass: f64,
    /// Index into the species ordering, `None` if unranged
    pub species: Option<u16>,
}

/// A fully labeled point cloud and its species index space
///
/// The `species_order` is the sorted unique composition labels of the
/// range table used for labeling. Every downstream container carries
/// this ordering, so per-atom species indices stay meaningful across
/// pipeline stages.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct LabeledCloud {
    /// Every ion with its species assignment, in detection order
    pub atoms: Vec<LabeledAtom>,
    /// Sorted species labels defining the index space
    pub species_order: Vec<String>,
    /// Display colour per species, aligned with `species_order`
    pub species_colours: Vec<String>,
}

impl LabeledCloud {
    /// Number of ions in the cloud
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check for an empty cloud
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Number of known species
    pub fn n_species(&self) -> usize {
        self.species_order.len()
    }

    /// Count of ions that matched no range
    pub fn n_unlabeled(&self) -> usize {
        self.atoms
            .iter()
            .filter(|atom| atom.species.is_none())
            .count()
    }
}

impl std::fmt::Display for LabeledCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "LabeledCloud {{ {} ions, {} species, {} unlabeled }}",
            self.len(),
            self.n_species(),
            self.n_unlabeled()
        )
    }
}
