//! Integration tests for full batch runs over an input directory

use compspace_pipeline::{run, Config};
use compspace_voxel::read_composition_file;
use rstest::{fixture, rstest};
use std::io::Write;
use std::path::{Path, PathBuf};

const RRNG: &str = "\
[Ions]
Number=2
Ion1=Fe
Ion2=O

[Ranges]
Number=2
Range1=53.000 57.000 Vol:0.01201 Fe:1 Color:FF0000
Range2=15.000 17.000 Vol:0.01101 O:1 Color:00B7FF
";

/// Write a `.pos` file of big-endian f32 records
fn write_pos(path: &Path, records: &[[f32; 4]]) {
    let mut file = std::fs::File::create(path).unwrap();
    for record in records {
        for value in record {
            file.write_all(&value.to_be_bytes()).unwrap();
        }
    }
}

/// 1000 ions on a 10x10x10 lattice, Fe/O checkerboard by mass
fn lattice_records() -> Vec<[f32; 4]> {
    let mut records = Vec::with_capacity(1000);
    for iz in 0..10 {
        for iy in 0..10 {
            for ix in 0..10 {
                let mass = if (ix + iy + iz) % 2 == 0 { 16.0 } else { 55.0 };
                records.push([
                    0.2 + ix as f32,
                    0.2 + iy as f32,
                    0.2 + iz as f32,
                    mass,
                ]);
            }
        }
    }
    records
}

/// Fresh input/output directories seeded with the lattice and ranges
#[fixture]
fn workspace(#[default("batch")] tag: &str) -> (PathBuf, PathBuf) {
    let root = std::env::temp_dir().join(format!(
        "compspace_pipeline_{tag}_{}",
        std::process::id()
    ));
    let input = root.join("input");
    let output = root.join("output");
    let _ = std::fs::remove_dir_all(&root);
    std::fs::create_dir_all(&input).unwrap();

    write_pos(&input.join("lattice.pos"), &lattice_records());
    std::fs::write(input.join("ranges.rrng"), RRNG).unwrap();

    (input, output)
}

fn config(input: &Path, output: &Path) -> Config {
    Config {
        input_path: input.to_path_buf(),
        output_path: output.to_path_buf(),
        n_big_slices: 2,
        voxel_size: 5.0,
        voxel_occupancy: 20,
        bucket_size: 100_000,
        progress: false,
    }
}

#[rstest]
fn end_to_end_lattice_composition(workspace: (PathBuf, PathBuf)) {
    let (input, output) = workspace;
    let summary = run(&config(&input, &output)).unwrap();

    assert!(summary.is_clean());
    assert_eq!(summary.completed.len(), 1);

    let (_, artifacts) = &summary.completed[0];
    let compositions = read_composition_file(&artifacts.composition).unwrap();

    // two slabs, four 5 nm half-cubes each, 125 ions apiece
    assert_eq!(compositions.n_records(), 8);
    assert_eq!(compositions.species_order, vec!["Fe:1", "O:1"]);

    for record in &compositions.records {
        assert_eq!(record.total_atoms, 125);
        assert!((record.labelled_fraction_sum() - 1.0).abs() < 1e-9);
        for fraction in &record.fractions {
            assert!((fraction - 0.5).abs() < 0.01);
        }
    }
}

#[rstest]
fn one_bad_file_does_not_sink_the_batch(#[with("isolation")] workspace: (PathBuf, PathBuf)) {
    let (input, output) = workspace;

    // 10 bytes is not a whole number of ion records
    std::fs::write(input.join("broken.pos"), [0u8; 10]).unwrap();

    let summary = run(&config(&input, &output)).unwrap();

    assert_eq!(summary.completed.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].0.ends_with("broken.pos"));
}

#[rstest]
fn missing_range_file_is_fatal(#[with("norange")] workspace: (PathBuf, PathBuf)) {
    let (input, output) = workspace;
    std::fs::remove_file(input.join("ranges.rrng")).unwrap();

    assert!(run(&config(&input, &output)).is_err());
}

#[rstest]
fn invalid_parameters_fail_before_processing(#[with("invalid")] workspace: (PathBuf, PathBuf)) {
    let (input, output) = workspace;

    let mut bad = config(&input, &output);
    bad.n_big_slices = 0;
    assert!(run(&bad).is_err());

    // nothing was written
    assert!(!output.exists());
}
