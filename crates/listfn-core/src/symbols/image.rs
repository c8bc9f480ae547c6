//! Binary image parsing and DWARF line lookup.
//!
//! [`BinaryTarget`] is a static [`Target`]: it reads one or more binaries from
//! disk, takes code symbols from their symbol tables, and answers line-table
//! queries through `addr2line`. There is no live process, so
//! [`Target::current_process`] is always `None`.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use addr2line::Context;
use gimli::{Dwarf, EndianArcSlice, RunTimeEndian, SectionId};
use object::{BinaryFormat, Object, ObjectSection, ObjectSymbol, SymbolKind};
use once_cell::unsync::OnceCell;
use tracing::{debug, info, warn};

use super::demangle::symbol_name;
use crate::error::{ListError, Result};
use crate::target::Target;
use crate::types::{Address, CodeSymbol, ModuleSymbols, RawLineEntry};

type OwnedReader = EndianArcSlice<RunTimeEndian>;

/// Every load gets a fresh generation so stale symbol indexes are detected
/// even when the same path is loaded again.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

const DWARF_SECTIONS: &[(&str, &[&str])] = &[
    (".debug_abbrev", &[".debug_abbrev", "__debug_abbrev"]),
    (".debug_addr", &[".debug_addr", "__debug_addr"]),
    (".debug_info", &[".debug_info", "__debug_info"]),
    (".debug_line", &[".debug_line", "__debug_line"]),
    (".debug_line_str", &[".debug_line_str", "__debug_line_str"]),
    (".debug_ranges", &[".debug_ranges", "__debug_ranges"]),
    (".debug_rnglists", &[".debug_rnglists", "__debug_rnglists"]),
    (".debug_str", &[".debug_str", "__debug_str"]),
    (".debug_str_offsets", &[".debug_str_offsets", "__debug_str_offsets"]),
    (".debug_types", &[".debug_types", "__debug_types"]),
    (".debug_aranges", &[".debug_aranges", "__debug_aranges"]),
];

fn load_section_bytes(file: &object::File<'_>, path: &Path, names: &[&str]) -> Result<Option<Arc<[u8]>>>
{
    for name in names {
        if let Some(section) = file.section_by_name(name) {
            let data = section.uncompressed_data().map_err(|err| ListError::BinaryLoad {
                path: path.to_path_buf(),
                reason: format!("failed to read {name}: {err}"),
            })?;
            return Ok(Some(match data {
                Cow::Borrowed(bytes) => Arc::<[u8]>::from(bytes),
                Cow::Owned(vec) => vec.into(),
            }));
        }
    }

    Ok(None)
}

/// Name as the compiler's source language spells it.
///
/// Mach-O prefixes every C-level symbol with `_` (`_main`, `__ZN...E`).
fn source_level_name(name: &str, format: BinaryFormat) -> &str
{
    match format {
        BinaryFormat::MachO => name.strip_prefix('_').unwrap_or(name),
        _ => name,
    }
}

fn code_symbol<'data>(symbol: &impl ObjectSymbol<'data>, format: BinaryFormat) -> Option<CodeSymbol>
{
    if symbol.kind() != SymbolKind::Text || !symbol.is_definition() || symbol.address() == 0 {
        return None;
    }
    let name = symbol
        .name()
        .ok()
        .map(|name| source_level_name(name, format))
        .filter(|name| !name.is_empty())?;
    let start = Address::from(symbol.address());
    let end = (symbol.size() > 0).then(|| start.saturating_add(symbol.size()));
    Some(CodeSymbol {
        name: symbol_name(name),
        start,
        end,
    })
}

/// A parsed binary: its code symbols plus the DWARF sections needed for line lookup.
pub struct BinaryImage
{
    module: ModuleSymbols,
    endian: RunTimeEndian,
    debug_sections: HashMap<&'static str, Arc<[u8]>>,
    context_cache: OnceCell<Option<Context<OwnedReader>>>,
}

impl BinaryImage
{
    /// Read and parse the binary at `path`.
    ///
    /// ## Errors
    ///
    /// [`ListError::BinaryLoad`] if the file cannot be read or is not a
    /// recognizable object file.
    pub fn parse(path: &Path) -> Result<Self>
    {
        let load_error = |reason: String| ListError::BinaryLoad {
            path: path.to_path_buf(),
            reason,
        };
        let bytes = fs::read(path).map_err(|err| load_error(err.to_string()))?;
        let file = object::File::parse(&*bytes).map_err(|err| load_error(err.to_string()))?;

        let endian = if file.is_little_endian() {
            RunTimeEndian::Little
        } else {
            RunTimeEndian::Big
        };

        let format = file.format();
        let symbols: Vec<CodeSymbol> = file
            .symbols()
            .filter_map(|symbol| code_symbol(&symbol, format))
            .collect();
        if symbols.is_empty() {
            warn!("{} has no symbol table; no function can be found by name", path.display());
        }

        let mut debug_sections = HashMap::new();
        for (canonical, aliases) in DWARF_SECTIONS {
            if let Some(data) = load_section_bytes(&file, path, aliases)? {
                debug_sections.insert(*canonical, data);
            }
        }
        if !debug_sections.contains_key(".debug_line") {
            warn!("{} has no .debug_line section; line lookups will be empty", path.display());
        }

        info!(
            "loaded {} ({} code symbols, {} debug sections)",
            path.display(),
            symbols.len(),
            debug_sections.len()
        );

        Ok(Self {
            module: ModuleSymbols {
                path: path.to_path_buf(),
                symbols,
            },
            endian,
            debug_sections,
            context_cache: OnceCell::new(),
        })
    }

    pub fn path(&self) -> &Path
    {
        &self.module.path
    }

    pub fn module(&self) -> &ModuleSymbols
    {
        &self.module
    }

    fn section_reader(&self, id: SectionId) -> OwnedReader
    {
        let data = self
            .debug_sections
            .get(id.name())
            .cloned()
            .unwrap_or_else(|| Arc::<[u8]>::from(Vec::new()));
        EndianArcSlice::new(data, self.endian)
    }

    /// Lazily built `addr2line` context; `None` if the DWARF data is unusable.
    fn symbol_context(&self) -> Option<&Context<OwnedReader>>
    {
        self.context_cache
            .get_or_init(|| {
                let context = Dwarf::load(|section| Ok::<_, gimli::Error>(self.section_reader(section)))
                    .and_then(Context::from_dwarf);
                match context {
                    Ok(context) => Some(context),
                    Err(err) => {
                        warn!("failed to build line context for {}: {err}", self.path().display());
                        None
                    }
                }
            })
            .as_ref()
    }

    /// Raw line row for `address`, exactly as DWARF reports it.
    pub fn line_for_address(&self, address: Address) -> Option<RawLineEntry>
    {
        let context = self.symbol_context()?;
        match context.find_location(address.value()) {
            Ok(location) => location.map(|location| RawLineEntry {
                file: location.file.map(str::to_string),
                line: location.line,
            }),
            Err(err) => {
                debug!("line lookup at {address} failed: {err}");
                None
            }
        }
    }
}

/// Static target made of binaries read from disk.
pub struct BinaryTarget
{
    images: Vec<BinaryImage>,
    modules: Vec<ModuleSymbols>,
    generation: u64,
}

impl BinaryTarget
{
    /// Load a single binary.
    ///
    /// ## Errors
    ///
    /// See [`BinaryImage::parse`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self>
    {
        Self::load_all([path])
    }

    /// Load several binaries; module order follows `paths`.
    ///
    /// ## Errors
    ///
    /// Fails on the first binary that cannot be parsed.
    pub fn load_all<P: AsRef<Path>>(paths: impl IntoIterator<Item = P>) -> Result<Self>
    {
        let images = paths
            .into_iter()
            .map(|path| BinaryImage::parse(path.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        let modules = images.iter().map(|image| image.module().clone()).collect();
        Ok(Self {
            images,
            modules,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// Re-read every module from disk under a new generation.
    ///
    /// ## Errors
    ///
    /// Same as [`BinaryTarget::load_all`].
    pub fn reload(&self) -> Result<Self>
    {
        Self::load_all(self.paths())
    }

    pub fn paths(&self) -> Vec<PathBuf>
    {
        self.images.iter().map(|image| image.path().to_path_buf()).collect()
    }
}

impl Target for BinaryTarget
{
    fn modules(&self) -> &[ModuleSymbols]
    {
        &self.modules
    }

    fn line_for_address(&self, address: Address) -> Option<RawLineEntry>
    {
        self.images.iter().find_map(|image| image.line_for_address(address))
    }

    fn generation(&self) -> u64
    {
        self.generation
    }
}
