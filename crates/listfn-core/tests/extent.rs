//! Tests for the end-line waterfall

use listfn_core::config::ResolverConfig;
use listfn_core::error::ListError;
use listfn_core::extent::{ExtentContext, ExtentResolver};
use listfn_core::source::MemorySourceFiles;
use listfn_core::symbols::{LinearScan, SymbolIndex, SyntheticTarget};
use listfn_core::types::{ExtentSource, RawLineEntry, SourceExtent};

const FILE: &str = "/src/app.c";

fn source_of(lines: usize) -> MemorySourceFiles
{
    let text: String = (1..=lines).map(|n| format!("line {n}\n")).collect();
    MemorySourceFiles::new().with_file(FILE, text)
}

fn resolve(target: &SyntheticTarget, sources: &MemorySourceFiles, name: &str, adjust: u32)
    -> listfn_core::Result<SourceExtent>
{
    let scan = LinearScan::new(target);
    let cx = ExtentContext::new(target, &scan, sources);
    let function = target.function_descriptor(name).expect("fixture function");
    ExtentResolver::new(ResolverConfig::default().with_end_line_adjust(adjust)).resolve(&cx, &function)
}

#[test]
fn test_end_address_line_minus_adjust()
{
    let target = SyntheticTarget::new()
        .function("compute", 0x1000, Some(0x1040))
        .function("after", 0x1040, None)
        .line(0x1000, FILE, 10)
        .line(0x1040, FILE, 25);
    let sources = source_of(40);

    for adjust in [1, 2] {
        let extent = resolve(&target, &sources, "compute", adjust).unwrap();
        assert_eq!(extent.start_line, 10);
        assert_eq!(extent.end_line, 25 - adjust);
        assert_eq!(extent.source, ExtentSource::EndAddress);
    }
}

#[test]
fn test_next_symbol_when_end_address_has_no_line()
{
    let target = SyntheticTarget::new()
        .function("compute", 0x1000, Some(0x1038))
        .function("after", 0x1040, None)
        .line(0x1000, FILE, 10)
        .line(0x1040, FILE, 30);
    let sources = source_of(40);

    let extent = resolve(&target, &sources, "compute", 1).unwrap();
    assert_eq!(extent.end_line, 29);
    assert_eq!(extent.source, ExtentSource::NextSymbol);
}

#[test]
fn test_next_symbol_when_end_address_is_unknown()
{
    let target = SyntheticTarget::new()
        .function("compute", 0x1000, None)
        .function("after", 0x1040, None)
        .line(0x1000, FILE, 10)
        .line(0x1040, FILE, 30);
    let sources = source_of(40);

    let extent = resolve(&target, &sources, "compute", 2).unwrap();
    assert_eq!(extent.end_line, 28);
    assert_eq!(extent.source, ExtentSource::NextSymbol);
}

#[test]
fn test_degenerate_end_entry_is_ignored()
{
    let target = SyntheticTarget::new()
        .function("compute", 0x1000, Some(0x1040))
        .function("after", 0x1050, None)
        .line(0x1000, FILE, 10)
        .raw_line(
            0x1040,
            RawLineEntry {
                file: Some(FILE.to_string()),
                line: Some(0),
            },
        )
        .line(0x1050, FILE, 21);
    let sources = source_of(40);

    let extent = resolve(&target, &sources, "compute", 1).unwrap();
    assert_eq!(extent.end_line, 20);
    assert_eq!(extent.source, ExtentSource::NextSymbol);
}

#[test]
fn test_end_before_start_falls_through()
{
    // End entry points back into a header line above the function.
    let target = SyntheticTarget::new()
        .function("compute", 0x1000, Some(0x1040))
        .function("after", 0x1040, None)
        .line(0x1000, FILE, 10)
        .line(0x1040, FILE, 5);
    let sources = source_of(18);

    let extent = resolve(&target, &sources, "compute", 1).unwrap();
    assert_eq!(extent.end_line, 18);
    assert_eq!(extent.source, ExtentSource::FileLength);
}

#[test]
fn test_last_symbol_uses_file_length()
{
    let target = SyntheticTarget::new()
        .function("first", 0x1000, Some(0x1040))
        .function("last", 0x1040, None)
        .line(0x1000, FILE, 1)
        .line(0x1040, FILE, 12);
    let sources = source_of(33);

    let extent = resolve(&target, &sources, "last", 1).unwrap();
    assert_eq!(extent.start_line, 12);
    assert_eq!(extent.end_line, 33);
    assert_eq!(extent.source, ExtentSource::FileLength);
}

#[test]
fn test_file_shorter_than_start_is_clamped()
{
    let target = SyntheticTarget::new()
        .function("last", 0x1040, None)
        .line(0x1040, FILE, 50);
    let sources = source_of(20);

    let extent = resolve(&target, &sources, "last", 1).unwrap();
    assert_eq!(extent.start_line, 50);
    assert_eq!(extent.end_line, 50);
}

#[test]
fn test_single_line_function_is_clamped()
{
    // end line - K == start - 1, and the file is shorter than the start line.
    let target = SyntheticTarget::new()
        .function("tiny", 0x1000, Some(0x1004))
        .line(0x1000, FILE, 7)
        .line(0x1004, FILE, 7);
    let sources = source_of(6);

    let extent = resolve(&target, &sources, "tiny", 1).unwrap();
    assert_eq!((extent.start_line, extent.end_line), (7, 7));
}

#[test]
fn test_missing_start_line_is_line_info_unavailable()
{
    let target = SyntheticTarget::new()
        .function("stripped", 0x1000, Some(0x1040))
        .line(0x1040, FILE, 9);
    let sources = source_of(10);

    let err = resolve(&target, &sources, "stripped", 1).unwrap_err();
    assert!(matches!(err, ListError::LineInfoUnavailable(_)));
}

#[test]
fn test_unreadable_source_on_file_length_fallback()
{
    let target = SyntheticTarget::new()
        .function("last", 0x1000, None)
        .line(0x1000, FILE, 3);
    let sources = MemorySourceFiles::new();

    let err = resolve(&target, &sources, "last", 1).unwrap_err();
    assert!(matches!(err, ListError::SourceUnavailable { .. }));
}

#[test]
fn test_start_never_exceeds_end()
{
    let ends: [(Option<u64>, Option<u32>); 5] = [
        (Some(0x1040), Some(1)),
        (Some(0x1040), Some(11)),
        (Some(0x1040), Some(100)),
        (Some(0x1040), None),
        (None, None),
    ];
    for (end_address, end_line) in ends {
        let mut target = SyntheticTarget::new()
            .function("f", 0x1000, end_address)
            .line(0x1000, FILE, 10);
        if let Some(line) = end_line {
            target = target.line(0x1040, FILE, line);
        }
        for file_lines in [0, 5, 10, 200] {
            let extent = resolve(&target, &source_of(file_lines), "f", 1).unwrap();
            assert!(
                extent.start_line <= extent.end_line,
                "{end_address:?}/{end_line:?}/{file_lines}: {extent:?}"
            );
        }
    }
}

#[test]
fn test_resolution_is_idempotent_with_index()
{
    let target = SyntheticTarget::new()
        .function("a", 0x1000, None)
        .function("b", 0x1100, None)
        .line(0x1000, FILE, 4)
        .line(0x1100, FILE, 19);
    let sources = source_of(30);
    let index = SymbolIndex::build(&target);
    let cx = ExtentContext::new(&target, &index, &sources);
    let resolver = ExtentResolver::new(ResolverConfig::default());
    let function = target.function_descriptor("a").unwrap();

    let first = resolver.resolve(&cx, &function).unwrap();
    let second = resolver.resolve(&cx, &function).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.end_line, 18);
}
