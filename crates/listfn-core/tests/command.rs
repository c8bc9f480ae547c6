//! Tests for the `lf` and `fi` commands

use std::fs;
use std::path::Path;
use std::rc::Rc;

use listfn_core::command::{describe_function, list_function, run_info_command, run_list_command};
use listfn_core::config::ResolverConfig;
use listfn_core::error::{ContextGap, ListError};
use listfn_core::source::{FsSourceFiles, MemorySourceFiles, SourceWindowRenderer};
use listfn_core::symbols::SyntheticTarget;
use listfn_core::target::DebugSession;
use listfn_core::types::{Address, ExtentSource, FrameState, ProcessState, SourceExtent, ThreadId, ThreadState};

const FILE: &str = "/src/app.c";

const APP_C: &str = concat!(
    "#include <stdio.h>\n",
    "\n",
    "static int add(int a, int b)   \n",
    "{\n",
    "    return a + b;\n",
    "}\n",
    "\n",
    "int main(void)\n",
    "{\n",
    "    printf(\"%d\\n\", add(1, 2));\n",
    "    return 0;\n",
    "}\n",
);

fn app_target() -> SyntheticTarget
{
    SyntheticTarget::new()
        .module("/bin/app")
        .function("add", 0x1000, Some(0x1020))
        .function("main", 0x1020, Some(0x1060))
        .line(0x1000, FILE, 3)
        .line(0x1020, FILE, 8)
        .line(0x1060, FILE, 13)
}

fn app_sources() -> MemorySourceFiles
{
    MemorySourceFiles::new().with_file(FILE, APP_C)
}

fn run(session: &DebugSession, args: &[&str]) -> String
{
    let args: Vec<String> = args.iter().map(|arg| (*arg).to_string()).collect();
    let mut out = Vec::new();
    run_list_command(session, &app_sources(), &ResolverConfig::default(), &args, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn numbered_file(dir: &Path, lines: usize) -> std::path::PathBuf
{
    let path = dir.join("numbered.c");
    let text: String = (1..=lines).map(|n| format!("  line {n} \t\n")).collect();
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn test_list_by_name_output_format()
{
    let session = DebugSession::with_target(app_target());
    let output = run(&session, &["add"]);
    assert_eq!(
        output,
        "Function: add\n\
         File: /src/app.c\n\
         Lines: 3-7\n   \
         3: static int add(int a, int b)\n   \
         4: {\n   \
         5:     return a + b;\n   \
         6: }\n   \
         7: \n"
    );
}

#[test]
fn test_list_second_function()
{
    let session = DebugSession::with_target(app_target());
    let listing = list_function(&session, &app_sources(), &ResolverConfig::default(), Some("main")).unwrap();
    assert_eq!((listing.extent.start_line, listing.extent.end_line), (8, 12));
    assert_eq!(listing.window.len(), 5);
    assert_eq!(listing.window.lines.last().unwrap().text, "}");
}

#[test]
fn test_list_current_frame()
{
    let session = DebugSession::with_target(app_target().stopped_in("main"));
    let listing = list_function(&session, &app_sources(), &ResolverConfig::default(), None).unwrap();
    assert_eq!(listing.function, "main");
    assert_eq!(listing.extent.start_line, 8);
}

#[test]
fn test_unknown_function_has_no_source_output()
{
    let session = DebugSession::with_target(app_target());
    let err = list_function(&session, &app_sources(), &ResolverConfig::default(), Some("nope")).unwrap_err();
    assert!(matches!(err, ListError::FunctionNotFound(ref name) if name == "nope"));

    let output = run(&session, &["nope"]);
    assert_eq!(output, "Could not find function named 'nope'\n");
}

#[test]
fn test_no_target()
{
    let session = DebugSession::new();
    assert_eq!(run(&session, &["add"]), "No target available.\n");
}

#[test]
fn test_missing_execution_context_links()
{
    let no_process = app_target();
    let no_thread = app_target().process(ProcessState {
        pid: 7,
        selected_thread: None,
    });
    let no_frame = app_target().process(ProcessState {
        pid: 7,
        selected_thread: Some(ThreadState {
            id: ThreadId::from(1),
            selected_frame: None,
        }),
    });
    let no_function = app_target().stopped_in("not-a-symbol");

    let cases = [
        (no_process, ContextGap::NoProcess),
        (no_thread, ContextGap::NoThread),
        (no_frame, ContextGap::NoFrame),
        (no_function, ContextGap::NoFunction),
    ];
    for (target, expected) in cases {
        let session = DebugSession::with_target(target);
        let err = list_function(&session, &app_sources(), &ResolverConfig::default(), None).unwrap_err();
        match err {
            ListError::NoExecutionContext(gap) => assert_eq!(gap, expected),
            other => panic!("expected {expected:?}, got {other:?}"),
        }
    }
}

#[test]
fn test_frame_function_without_line_info()
{
    let target = app_target().process(ProcessState {
        pid: 7,
        selected_thread: Some(ThreadState {
            id: ThreadId::from(1),
            selected_frame: Some(FrameState {
                pc: Address::from(0x9000),
                function: SyntheticTarget::new()
                    .function("jit_stub", 0x9000, None)
                    .function_descriptor("jit_stub"),
            }),
        }),
    });
    let session = DebugSession::with_target(target);
    let output = run(&session, &[]);
    assert_eq!(output, "Could not determine starting line for function 'jit_stub'\n");
}

#[test]
fn test_usage_errors_are_reported_in_band()
{
    let session = DebugSession::with_target(app_target());
    assert!(run(&session, &["-n"]).starts_with("Invalid argument: unknown option '-n'"));
    assert!(run(&session, &["a", "b"]).starts_with("Invalid argument: expected at most one"));
}

#[test]
fn test_render_window_inside_file_from_disk()
{
    let dir = tempfile::tempdir().unwrap();
    let path = numbered_file(dir.path(), 10);
    let extent = SourceExtent {
        file_path: path,
        start_line: 3,
        end_line: 7,
        source: ExtentSource::EndAddress,
    };

    let window = SourceWindowRenderer::new(&FsSourceFiles).render(&extent).unwrap();
    let numbers: Vec<u32> = window.lines.iter().map(|line| line.number).collect();
    assert_eq!(numbers, vec![3, 4, 5, 6, 7]);
    for line in &window.lines {
        assert_eq!(line.text, format!("  line {}", line.number));
    }
}

#[test]
fn test_render_window_past_end_of_file_from_disk()
{
    let dir = tempfile::tempdir().unwrap();
    let path = numbered_file(dir.path(), 12);
    let extent = SourceExtent {
        file_path: path,
        start_line: 8,
        end_line: 20,
        source: ExtentSource::NextSymbol,
    };

    let window = SourceWindowRenderer::new(&FsSourceFiles).render(&extent).unwrap();
    let numbers: Vec<u32> = window.lines.iter().map(|line| line.number).collect();
    assert_eq!(numbers, vec![8, 9, 10, 11, 12]);
}

#[test]
fn test_render_missing_file_is_source_unavailable()
{
    let dir = tempfile::tempdir().unwrap();
    let extent = SourceExtent {
        file_path: dir.path().join("deleted.c"),
        start_line: 1,
        end_line: 2,
        source: ExtentSource::FileLength,
    };
    let err = SourceWindowRenderer::new(&FsSourceFiles).render(&extent).unwrap_err();
    assert!(matches!(err, ListError::SourceUnavailable { .. }));
}

#[test]
fn test_repeated_listing_is_identical()
{
    let session = DebugSession::with_target(app_target());
    let config = ResolverConfig::default();
    let first = list_function(&session, &app_sources(), &config, Some("add")).unwrap();
    let second = list_function(&session, &app_sources(), &config, Some("add")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_symbol_index_is_reused_until_target_changes()
{
    let mut session = DebugSession::with_target(app_target().with_generation(1));
    let first = session.symbol_index().unwrap();
    let again = session.symbol_index().unwrap();
    assert!(Rc::ptr_eq(&first, &again));

    session.replace_target(Box::new(app_target().with_generation(1)));
    let rebuilt = session.symbol_index().unwrap();
    assert!(!Rc::ptr_eq(&first, &rebuilt));
}

#[test]
fn test_symbol_index_rebuilt_on_generation_change()
{
    let mut session = DebugSession::with_target(app_target().with_generation(1));
    let old = session.symbol_index().unwrap();
    assert_eq!(old.generation(), 1);

    // Same session, relaunched target: the stale index must not be reused.
    session.replace_target(Box::new(
        SyntheticTarget::new()
            .function("relocated", 0x5000, None)
            .with_generation(2),
    ));
    let new = session.symbol_index().unwrap();
    assert_eq!(new.generation(), 2);
    assert_eq!(new.len(), 1);
}

#[test]
fn test_describe_function()
{
    let session = DebugSession::with_target(app_target());
    let info = describe_function(&session, "main").unwrap();
    assert_eq!(info.to_string(), "main 0x1020-0x1060\n");

    let mut out = Vec::new();
    run_info_command(&session, &[], &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("missing function name"));
}

#[test]
fn test_cpp_function_found_by_plain_name()
{
    let target = SyntheticTarget::new()
        .function("_ZN4math3addEii", 0x4000, Some(0x4020))
        .line(0x4000, "/src/math.cpp", 3)
        .line(0x4020, "/src/math.cpp", 7);
    let sources = MemorySourceFiles::new().with_file("/src/math.cpp", "\n\nint add(int a, int b)\n{\n    return a + b;\n}\n\n");
    let session = DebugSession::with_target(target);

    let listing = list_function(&session, &sources, &ResolverConfig::default(), Some("math::add")).unwrap();
    assert_eq!(listing.function, "math::add");
    assert_eq!((listing.extent.start_line, listing.extent.end_line), (3, 6));

    let info = describe_function(&session, "_ZN4math3addEii").unwrap();
    assert_eq!(info.to_string(), "math::add 0x4000-0x4020\n");
}
