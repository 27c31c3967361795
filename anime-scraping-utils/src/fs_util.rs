use std::{fmt::Debug, io::BufWriter, path::PathBuf};

use anyhow::Context;
use fs_err::File;
use serde::{de::DeserializeOwned, Serialize};

/// Reads a whole TOML file into `T`.  Errors name the file.
pub fn read_toml<P, T>(path: P) -> anyhow::Result<T>
where
    P: Into<PathBuf> + Debug,
    T: DeserializeOwned,
{
    let path = path.into();
    let text = fs_err::read_to_string(&path)?;
    toml::from_str(&text).with_context(|| {
        format!(
            "{path:?} is not a valid {}",
            std::any::type_name::<T>()
        )
    })
}

/// Writes `header` followed by one record per row.
///
/// The header is written even if `rows` is empty.
pub fn write_csv<P, T, I>(path: P, header: &[&str], rows: I) -> anyhow::Result<()>
where
    P: Into<PathBuf> + Debug,
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let path = path.into();
    (|| {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(File::create(&path)?));
        writer.write_record(header)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        anyhow::Ok(())
    })()
    .with_context(|| format!("While trying to write {path:?} as csv"))
}
