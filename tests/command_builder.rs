mod common;
use crate::common::{GoSourceBuilder, go_test_builder, init_tracing};

use std::path::Path;

use ram::command::{CommandTemplate, Placeholders, RUN_FLAG, test_pattern};
use ram::exec::{ENV_TEST_DIRECTORY, ENV_TEST_FILENAME};
use ram::fs::mock::MockFileSystem;

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn relative_dir_placeholder_gets_dot_slash_prefix() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file("pkg/sub/file.go", "package sub\n");
    let builder = go_test_builder(&fs, &["-run", "${relative_dir}"]);

    let args = builder.build(Path::new("pkg/sub/file.go"));

    assert_eq!(args, strings(&["-run", "./pkg/sub"]));
}

#[test]
fn all_placeholders_expand_in_both_spellings() {
    let vars = Placeholders::for_path(Path::new("pkg/sub/file.go"));

    assert_eq!(vars.expand("${filepath}"), "pkg/sub/file.go");
    assert_eq!(vars.expand("$filepath"), "pkg/sub/file.go");
    assert_eq!(vars.expand("./${dir}/..."), "./pkg/sub/...");
    assert_eq!(vars.expand("$relative_dir"), "./pkg/sub");
    assert_eq!(vars.expand("--out=${dir}.txt"), "--out=pkg/sub.txt");
}

#[test]
fn unknown_placeholders_are_left_untouched() {
    let vars = Placeholders::for_path(Path::new("a.go"));

    assert_eq!(vars.expand("${HOME}/x"), "${HOME}/x");
    assert_eq!(vars.expand("$nope"), "$nope");
}

#[test]
fn bare_file_name_has_current_directory() {
    let vars = Placeholders::for_path(Path::new("main.go"));

    assert_eq!(vars.dir, ".");
    assert_eq!(vars.relative_dir, ".");
    assert_eq!(vars.expand("./${dir}"), "./.");
}

#[test]
fn already_dotted_path_is_not_prefixed_twice() {
    let vars = Placeholders::for_path(Path::new("./pkg/file.go"));

    assert_eq!(vars.relative_dir, "./pkg");
}

#[test]
fn single_build_tag_is_prepended() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/os_linux.go",
        GoSourceBuilder::new("pkg").build_tag("linux").func("helper").build(),
    );
    let builder = go_test_builder(&fs, &["-v", "./${dir}"]);

    let args = builder.build(Path::new("pkg/os_linux.go"));

    assert_eq!(args, strings(&["-tags=linux", "-v", "./pkg"]));
}

#[test]
fn go_build_directive_is_accepted() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/db.go",
        GoSourceBuilder::new("pkg").first_line("//go:build integration").build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let args = builder.build(Path::new("pkg/db.go"));

    assert_eq!(args, strings(&["-tags=integration", "./pkg"]));
}

#[test]
fn multiple_build_tokens_yield_no_tag() {
    init_tracing();
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/os.go",
        GoSourceBuilder::new("pkg").build_tag("linux darwin").build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let args = builder.build(Path::new("pkg/os.go"));

    assert_eq!(args, strings(&["./pkg"]));
}

#[test]
fn test_file_narrows_run_to_declared_tests() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x_test.go",
        GoSourceBuilder::new("pkg")
            .test("TestAlpha")
            .func("helperBeta")
            .test("TestBeta")
            .build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let args = builder.build(Path::new("pkg/x_test.go"));

    assert_eq!(
        args,
        strings(&["./pkg", RUN_FLAG, "^TestAlpha|TestBeta$"])
    );
}

#[test]
fn tag_template_and_run_flag_appear_in_order() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x_test.go",
        GoSourceBuilder::new("pkg")
            .build_tag("e2e")
            .test("TestOnly")
            .build(),
    );
    let builder = go_test_builder(&fs, &["-count=1", "./${dir}"]);

    let args = builder.build(Path::new("pkg/x_test.go"));

    assert_eq!(
        args,
        strings(&["-tags=e2e", "-count=1", "./pkg", "-test.run", "^TestOnly$"])
    );
}

#[test]
fn non_test_file_never_gets_run_flag() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x.go",
        GoSourceBuilder::new("pkg").test("TestLooksLikeATest").build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let args = builder.build(Path::new("pkg/x.go"));

    assert!(!args.iter().any(|a| a == RUN_FLAG));
    assert_eq!(args, strings(&["./pkg"]));
}

#[test]
fn test_file_without_tests_runs_everything() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x_test.go",
        GoSourceBuilder::new("pkg").func("helper").build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    assert_eq!(builder.build(Path::new("pkg/x_test.go")), strings(&["./pkg"]));
}

#[test]
fn unreadable_file_still_builds_a_command() {
    init_tracing();
    let fs = MockFileSystem::new();
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let args = builder.build(Path::new("gone/x_test.go"));

    assert_eq!(args, strings(&["./gone"]));
}

#[test]
fn build_is_idempotent() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x_test.go",
        GoSourceBuilder::new("pkg").build_tag("unit").test("TestA").build(),
    );
    let builder = go_test_builder(&fs, &["-v", "${filepath}"]);

    let first = builder.build(Path::new("pkg/x_test.go"));
    let second = builder.build(Path::new("pkg/x_test.go"));

    assert_eq!(first, second);
}

#[test]
fn invocation_carries_program_prefix_and_test_environment() {
    let fs = MockFileSystem::new();
    fs.add_file("pkg/sub/x.go", "package sub\n");
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let inv = builder.invocation(Path::new("pkg/sub/x.go"));

    assert_eq!(inv.program, "go");
    assert_eq!(inv.args, strings(&["test", "./pkg/sub"]));
    assert_eq!(inv.env_var(ENV_TEST_DIRECTORY), Some("./pkg/sub"));
    assert_eq!(inv.env_var(ENV_TEST_FILENAME), Some("./pkg/sub/x.go"));
    assert_eq!(inv.to_string(), "go test ./pkg/sub");
}

#[test]
fn tags_flag_lands_after_the_program_prefix() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "x.go",
        GoSourceBuilder::new("main").build_tag("linux").build(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    let inv = builder.invocation(Path::new("x.go"));

    assert_eq!(inv.to_string(), "go test -tags=linux ./.");
}

#[test]
fn template_rejects_missing_program() {
    assert!(CommandTemplate::new(Vec::new(), strings(&["-v"])).is_err());
    assert!(CommandTemplate::new(strings(&[""]), Vec::new()).is_err());
}

#[test]
fn template_display_joins_words() {
    let template = CommandTemplate::new(strings(&["go", "test"]), strings(&["-v", "./${dir}"]))
        .unwrap();

    assert_eq!(template.to_string(), "go test -v ./${dir}");
}

#[test]
fn test_pattern_is_anchored_alternation() {
    assert_eq!(test_pattern(&strings(&["TestA"])), "^TestA$");
    assert_eq!(test_pattern(&strings(&["TestA", "TestB", "TestC"])), "^TestA|TestB|TestC$");
}

#[test]
fn invalid_utf8_test_file_keeps_tag_and_runs_everything() {
    let fs = MockFileSystem::new();
    fs.add_file(
        "pkg/x_test.go",
        b"//go:build e2e\n\npackage pkg\n\nvar s = \"\xff\"\n\nfunc TestA(t *testing.T) {}\n".to_vec(),
    );
    let builder = go_test_builder(&fs, &["./${dir}"]);

    assert_eq!(
        builder.build(Path::new("pkg/x_test.go")),
        strings(&["-tags=e2e", "./pkg"])
    );
}
