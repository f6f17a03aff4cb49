// Shared fixtures for unit tests.

use std::{fs::File, io::Write, path::Path};

use zip::{write::SimpleFileOptions, CompressionMethod, ZipWriter};

/// Write a zip archive at `path` holding `(name, contents)` entries in order.
pub fn write_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(contents.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Synthetic bank-style CSV: 12 columns, a 3-valued `job` column and a
/// yes/no `y` column that depends on `duration` and `job`.
pub fn synthetic_bank_csv(rows: usize) -> String {
    let jobs = ["admin.", "technician", "services"];
    let mut out = String::from(
        "age;job;balance;day;duration;campaign;pdays;previous;hours;visits;score;y\n",
    );

    for i in 0..rows {
        let job      = jobs[i % 3];
        let duration = (i * 37) % 600;
        let yes      = duration > 400 || (job == "services" && duration > 250);
        out.push_str(&format!(
            "{};{};{};{};{};{};{};{};{};{};{};{}\n",
            20 + i % 50,
            job,
            (i * 13) % 2000,
            1 + i % 28,
            duration,
            1 + i % 4,
            -1,
            i % 3,
            (i * 7) % 40,
            i % 11,
            (i * 17) % 100,
            if yes { "yes" } else { "no" },
        ));
    }
    out
}
