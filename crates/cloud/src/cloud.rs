// crate modules
use crate::error::{Error, Result};

/// A single detected ion from the position file
///
/// Coordinates are in nanometres, and `mass` is the mass-to-charge
/// ratio in Daltons. The species is unknown at this point; ions are
/// assigned a species downstream by ranging against a `.rrng` table.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct RawAtom {
    /// x coordinate (nm)
    pub x: f64,
    /// y coordinate (nm)
    pub y: f64,
    /// z coordinate (nm)
    pub z: f64,
    /// Mass-to-charge ratio (Da)
    pub mass: f64,
}

/// Full collection of detected ions for one input file
///
/// This is the raw, unlabeled output contract of the vendor file
/// readers. The full cloud is held in memory; APT datasets run to
/// tens of millions of ions at 32 bytes each, which is comfortably
/// within whole-file residency.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PointCloud {
    /// Every detected ion in detection order
    pub atoms: Vec<RawAtom>,
}

impl PointCloud {
    /// Number of detected ions in the cloud
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Check for an empty cloud
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Build a cloud from separate coordinate and mass columns
    ///
    /// This is the seam for external vendor transcoders that produce
    /// columnar output rather than `.pos` records. All four columns
    /// must be the same length.
    ///
    /// ```rust
    /// # use compspace_cloud::PointCloud;
    /// let cloud = PointCloud::from_columns(
    ///     vec![1.0, 2.0],
    ///     vec![0.0, 0.5],
    ///     vec![3.0, 4.0],
    ///     vec![55.9, 56.2],
    /// ).unwrap();
    ///
    /// assert_eq!(cloud.len(), 2);
    /// assert_eq!(cloud.atoms[1].mass, 56.2);
    /// ```
    pub fn from_columns(
        x: Vec<f64>,
        y: Vec<f64>,
        z: Vec<f64>,
        mass: Vec<f64>,
    ) -> Result<Self> {
        if x.len() != y.len() || x.len() != z.len() || x.len() != mass.len() {
            return Err(Error::MismatchedColumns {
                x: x.len(),
                y: y.len(),
                z: z.len(),
                mass: mass.len(),
            });
        }

        let atoms = x
            .into_iter()
            .zip(y)
            .zip(z)
            .zip(mass)
            .map(|(((x, y), z), mass)| RawAtom { x, y, z, mass })
            .collect();

        Ok(Self { atoms })
    }
}

impl std::fmt::Display for PointCloud {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "PointCloud {{ {} ions }}", self.len())
    }
}
