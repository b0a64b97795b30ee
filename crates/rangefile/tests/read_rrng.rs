//! Integration tests for range file reading and labeling

use compspace_cloud::{PointCloud, RawAtom};
use compspace_rangefile::{read_rrng_file, Error, RangeTable};
use rstest::{fixture, rstest};

#[fixture]
fn table() -> RangeTable {
    read_rrng_file("./data/fe_cr_o.rrng").unwrap()
}

fn cloud(masses: &[f64]) -> PointCloud {
    PointCloud {
        atoms: masses
            .iter()
            .map(|&mass| RawAtom {
                mass,
                ..Default::default()
            })
            .collect(),
    }
}

#[rstest]
fn records_are_collected_in_file_order(table: RangeTable) {
    assert_eq!(table.ions.len(), 3);
    assert_eq!(table.ranges.len(), 6);

    assert_eq!(table.ions[1].name, "Cr");
    assert_eq!(table.ranges[5].comp, "Fe:1 O:1");
    assert_eq!(table.ranges[3].lower, 15.78);
}

#[rstest]
fn species_ordering_is_sorted_and_unique(table: RangeTable) {
    assert_eq!(
        table.species_order(),
        vec!["Cr:1", "Fe:1", "Fe:1 O:1", "O:1"]
    );
}

#[rstest]
fn labeling_covers_every_range(table: RangeTable) {
    let labeled = table.label(&cloud(&[27.0, 26.0, 16.0, 36.0, 5.0]));
    let order = &labeled.species_order;

    let names: Vec<Option<&str>> = labeled
        .atoms
        .iter()
        .map(|atom| atom.species.map(|s| order[s as usize].as_str()))
        .collect();

    assert_eq!(
        names,
        vec![Some("Fe:1"), Some("Cr:1"), Some("O:1"), Some("Fe:1 O:1"), None]
    );
    assert_eq!(labeled.n_unlabeled(), 1);
}

#[rstest]
fn missing_file_is_reported() {
    let result = read_rrng_file("./data/not_here.rrng");
    assert!(matches!(result, Err(Error::FileNotFound(_))));
}
