//! Range table data and ion labeling

// standard library
use std::collections::HashMap;

// crate modules
use crate::label::{LabeledAtom, LabeledCloud};

// compspace modules
use compspace_cloud::PointCloud;
use compspace_utils::f;

// external crates
use itertools::Itertools;

/// A named ion from an `Ion<N>=<name>` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ion {
    /// Ion number from the record tag
    pub number: u32,
    /// Element or molecular ion name, e.g. `Fe`
    pub name: String,
}

/// A mass-to-charge interval from a `Range<N>=` record
///
/// Bounds are inclusive at both ends. Entries are kept in file order
/// and are not required to be disjoint; see [RangeTable::label] for
/// how overlaps resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeEntry {
    /// Range number from the record tag
    pub number: u32,
    /// Lower bound of the interval (Da)
    pub lower: f64,
    /// Upper bound of the interval (Da)
    pub upper: f64,
    /// Ionic volume (nm3)
    pub volume: f64,
    /// Composition label, e.g. `Fe:1` or `Fe:1 O:1`
    pub comp: String,
    /// Display colour as six hex digits
    pub colour: String,
}

impl RangeEntry {
    /// Check if a mass-to-charge value falls inside the interval
    ///
    /// ```rust
    /// # use compspace_rangefile::RangeEntry;
    /// let range = RangeEntry {
    ///     number: 1,
    ///     lower: 53.9,
    ///     upper: 54.1,
    ///     volume: 0.012,
    ///     comp: "Fe:1".to_string(),
    ///     colour: "FF0000".to_string(),
    /// };
    ///
    /// // bounds are inclusive at both ends
    /// assert!(range.contains(53.9));
    /// assert!(range.contains(54.1));
    /// assert!(!range.contains(54.2));
    /// ```
    pub fn contains(&self, mass: f64) -> bool {
        self.lower <= mass && mass <= self.upper
    }
}

/// Full content of a `.rrng` range file
///
/// Holds the named ions and the ordered list of mass-to-charge
/// intervals. The table is immutable for the lifetime of a pipeline
/// run; every stage shares the species ordering it defines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RangeTable {
    /// Named ions in file order
    pub ions: Vec<Ion>,
    /// Mass-to-charge intervals in file order
    pub ranges: Vec<RangeEntry>,
}

impl RangeTable {
    /// The sorted, deduplicated species labels of the table
    ///
    /// This ordering defines the species index space used by every
    /// downstream container, so it must be stable for a given table.
    ///
    /// ```rust
    /// # use compspace_rangefile::{RangeEntry, RangeTable};
    /// # let entry = |comp: &str| RangeEntry {
    /// #     number: 1,
    /// #     lower: 0.0,
    /// #     upper: 1.0,
    /// #     volume: 0.0,
    /// #     comp: comp.to_string(),
    /// #     colour: "FFFFFF".to_string(),
    /// # };
    /// let table = RangeTable {
    ///     ions: vec![],
    ///     ranges: vec![entry("O:1"), entry("Fe:1"), entry("O:1")],
    /// };
    ///
    /// assert_eq!(table.species_order(), vec!["Fe:1", "O:1"]);
    /// ```
    pub fn species_order(&self) -> Vec<String> {
        self.ranges
            .iter()
            .map(|range| range.comp.clone())
            .sorted()
            .dedup()
            .collect()
    }

    /// Display colour for each species in [RangeTable::species_order]
    ///
    /// Taken from the first range carrying the label, `#`-prefixed for
    /// display use.
    pub fn species_colours(&self) -> Vec<String> {
        self.species_order()
            .iter()
            .map(|label| {
                // species_order is built from the ranges, so a first
                // match always exists
                let range = self
                    .ranges
                    .iter()
                    .find(|range| &range.comp == label)
                    .unwrap();
                f!("#{}", range.colour)
            })
            .collect()
    }

    /// Assign a species to every ion in the cloud
    ///
    /// Ranges are applied in table order with inclusive bounds, so an
    /// ion whose mass falls in several overlapping ranges takes the
    /// species of the **last** matching range. Ions matching no range
    /// are left unlabeled.
    pub fn label(&self, cloud: &PointCloud) -> LabeledCloud {
        let species_order = self.species_order();
        let indices: HashMap<&str, u16> = species_order
            .iter()
            .enumerate()
            .map(|(index, label)| (label.as_str(), index as u16))
            .collect();

        let atoms = cloud
            .atoms
            .iter()
            .map(|atom| {
                // reversed scan == iterate-and-overwrite in file order
                let species = self
                    .ranges
                    .iter()
                    .rev()
                    .find(|range| range.contains(atom.mass))
                    .map(|range| indices[range.comp.as_str()]);

                LabeledAtom {
                    x: atom.x,
                    y: atom.y,
                    z: atom.z,
                    mass: atom.mass,
                    species,
                }
            })
            .collect();

        LabeledCloud {
            atoms,
            species_order,
            species_colours: self.species_colours(),
        }
    }
}

impl std::fmt::Display for RangeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "RangeTable {{ {} ions, {} ranges, {} species }}",
            self.ions.len(),
            self.ranges.len(),
            self.species_order().len()
        )
    }
}
