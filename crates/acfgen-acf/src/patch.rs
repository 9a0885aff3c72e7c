use acfgen_core::params::{ParameterSet, Value};
use acfgen_core::template::Template;
use chrono::Local;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AcfError {
    #[error("no valid PROPERTIES_BEGIN/PROPERTIES_END block in target ACF")]
    MissingPropertiesBlock,

    #[error("target must be backed up before writing")]
    BackupRequired,

    #[error("target was already written by this patcher")]
    AlreadyWritten,

    #[error("refusing to overwrite existing file {0}")]
    TargetExists(PathBuf),

    #[error(transparent)]
    Render(#[from] acfgen_core::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Strip existing body/wing property lines and insert the new blocks.
#[derive(Debug, Clone)]
pub struct Spliced {
    pub text: String,
    pub removed_lines: usize,
    pub inserted_lines: usize,
}

pub fn splice_blocks(
    text: &str,
    body_block: &str,
    wing_block: &str,
) -> Result<Spliced, AcfError> {
    let lines: Vec<&str> = text.lines().collect();
    let begin = lines
        .iter()
        .position(|l| l.trim() == "PROPERTIES_BEGIN")
        .ok_or(AcfError::MissingPropertiesBlock)?;
    let end = begin
        + 1
        + lines[begin + 1..]
            .iter()
            .position(|l| l.trim() == "PROPERTIES_END")
            .ok_or(AcfError::MissingPropertiesBlock)?;

    let mut out: Vec<String> = Vec::with_capacity(lines.len());
    let mut insert_at: Option<usize> = None;
    let mut removed = 0usize;
    for (i, line) in lines.iter().enumerate() {
        let generated = i > begin
            && i < end
            && (line.trim_start().starts_with("P _body/")
                || line.trim_start().starts_with("P _wing/"));
        if generated {
            // Remember where the old block started; new lines go there.
            if insert_at.is_none() {
                insert_at = Some(out.len());
            }
            removed += 1;
            continue;
        }
        out.push((*line).to_string());
    }

    // Nothing was stripped ahead of PROPERTIES_BEGIN, so indices agree.
    let at = insert_at.unwrap_or(begin + 1);
    let block_lines: Vec<String> = body_block
        .lines()
        .chain(wing_block.lines())
        .map(str::to_string)
        .collect();
    let inserted = block_lines.len();
    out.splice(at..at, block_lines);

    let mut text = out.join("\n");
    text.push('\n');
    Ok(Spliced {
        text,
        removed_lines: removed,
        inserted_lines: inserted,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchState {
    Unwritten,
    BackedUp,
    Written,
}

/// Patches one existing ACF file: backup, then a temp-file + rename write.
///
/// Backup is mandatory before the write, and the write happens at most
/// once per patcher.
#[derive(Debug)]
pub struct AcfPatcher {
    target: PathBuf,
    state: PatchState,
    backup_path: Option<PathBuf>,
}

impl AcfPatcher {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            state: PatchState::Unwritten,
            backup_path: None,
        }
    }

    pub fn state(&self) -> PatchState {
        self.state
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup_path.as_deref()
    }

    pub fn back_up(&mut self) -> Result<&Path, AcfError> {
        if self.state == PatchState::Written {
            return Err(AcfError::AlreadyWritten);
        }
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let name = self
            .target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "target".to_string());
        let backup = self.target.with_file_name(format!("{name}.bak-{stamp}"));
        std::fs::copy(&self.target, &backup)?;
        self.backup_path = Some(backup);
        self.state = PatchState::BackedUp;
        Ok(self.backup_path.as_deref().expect("just set"))
    }

    pub fn write(&mut self, body_block: &str, wing_block: &str) -> Result<Spliced, AcfError> {
        match self.state {
            PatchState::Unwritten => return Err(AcfError::BackupRequired),
            PatchState::Written => return Err(AcfError::AlreadyWritten),
            PatchState::BackedUp => {}
        }
        let text = std::fs::read_to_string(&self.target)?;
        let spliced = splice_blocks(&text, body_block, wing_block)?;
        write_two_stage(&self.target, &spliced.text)?;
        self.state = PatchState::Written;
        Ok(spliced)
    }
}

/// Render the bundled new-aircraft skeleton with the blocks inserted.
/// Refuses to clobber an existing file.
pub fn write_new_acf(
    path: &Path,
    acf_name: &str,
    body_block: &str,
    wing_block: &str,
) -> Result<(), AcfError> {
    if path.exists() {
        return Err(AcfError::TargetExists(path.to_path_buf()));
    }

    let template = Template::parse(crate::templates::NEW_ACF)?;
    let mut params = ParameterSet::new();
    params.set("acf_name", Value::Text(acf_name.to_string()));
    let skeleton = template.render(&params)?;

    let spliced = splice_blocks(&skeleton, body_block, wing_block)?;
    write_two_stage(path, &spliced.text)?;
    Ok(())
}

fn write_two_stage(path: &Path, contents: &str) -> std::io::Result<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let tmp = path.with_file_name(format!("{name}.tmp"));
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)
}
