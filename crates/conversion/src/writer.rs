//! Artifact serialization.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::artifact::Artifact;
use crate::error::Result;

/// Write `artifact` as JSON to `dest`, or to standard output when `dest` is `-`.
pub fn write_artifact(artifact: &Artifact, dest: impl AsRef<Path>) -> Result<()> {
    let dest = dest.as_ref();

    if dest == Path::new("-") {
        let stdout = io::stdout();
        write_to(artifact, stdout.lock())?;
    } else {
        write_to(artifact, File::create(dest)?)?;
    }

    info!(
        output = %dest.display(),
        shape = ?artifact.shape(),
        present = artifact.count_present(),
        "Wrote artifact"
    );

    Ok(())
}

/// Write `artifact` as JSON to any writer.
pub fn write_to(artifact: &Artifact, writer: impl Write) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer(&mut writer, artifact)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
