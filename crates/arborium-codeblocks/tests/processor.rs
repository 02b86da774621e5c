use arborium_codeblocks::processor::{ProcessOptions, Processor};
use arborium_codeblocks::{CodeBlockHighlighter, Options};
use indoc::indoc;
use std::fs;

const PAGE: &str = indoc! {r#"
    <html><body>
    <pre><code class="language-json">{"a": [1, 2]}</code></pre>
    <pre><code class="language-nope">???</code></pre>
    </body></html>
"#};

const PLAIN: &str = "<html><body><p>nothing here</p></body></html>\n";

fn processor(input: &std::path::Path, output: Option<&std::path::Path>) -> Processor {
    Processor::new(
        ProcessOptions {
            input: input.to_path_buf(),
            output: output.map(|p| p.to_path_buf()),
            verbose: false,
        },
        CodeBlockHighlighter::new(Options::default()),
    )
}

#[cfg(feature = "lang-json")]
#[tokio::test]
async fn processes_directory_in_place() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    fs::write(dir.path().join("index.html"), PAGE).unwrap();
    fs::write(dir.path().join("nested/plain.html"), PLAIN).unwrap();
    fs::write(dir.path().join("notes.txt"), PAGE).unwrap();

    let stats = processor(dir.path(), None).process().await.unwrap();

    assert_eq!(stats.files_processed, 2);
    assert_eq!(stats.files_changed, 1);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.blocks.highlighted, 1);
    assert_eq!(stats.blocks.unknown, 1);
    assert_eq!(stats.blocks.unknown_languages, ["nope"]);
    assert_eq!(stats.message_count(), 1);
    assert!(stats.reports[0].path.as_ref().unwrap().ends_with("index.html"));

    let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
    assert!(index.contains(r#"class="pl-"#), "{index}");
    assert!(index.contains(r#"<code class="language-nope">???</code>"#));
    assert_eq!(fs::read_to_string(dir.path().join("nested/plain.html")).unwrap(), PLAIN);
    assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), PAGE);
}

#[cfg(feature = "lang-json")]
#[tokio::test]
async fn processes_directory_into_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("site");
    let output = dir.path().join("out");
    fs::create_dir(&input).unwrap();
    fs::write(input.join("index.html"), PAGE).unwrap();

    let stats = processor(&input, Some(&output)).process().await.unwrap();

    assert_eq!(stats.files_changed, 1);
    assert_eq!(fs::read_to_string(input.join("index.html")).unwrap(), PAGE);
    let written = fs::read_to_string(output.join("index.html")).unwrap();
    assert_ne!(written, PAGE);
    assert!(written.contains(r#"class="pl-"#));
}

#[cfg(feature = "lang-json")]
#[tokio::test]
async fn processes_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("page.html");
    let output = dir.path().join("build/page.html");
    fs::write(&input, PAGE).unwrap();

    let stats = processor(&input, Some(&output)).process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.blocks.highlighted, 1);
    assert_eq!(fs::read_to_string(&input).unwrap(), PAGE);
    assert!(fs::read_to_string(&output).unwrap().contains(r#"class="pl-"#));
}

#[tokio::test]
async fn untouched_single_file_is_not_rewritten() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("plain.html");
    fs::write(&input, PLAIN).unwrap();

    let stats = processor(&input, None).process().await.unwrap();

    assert_eq!(stats.files_processed, 1);
    assert_eq!(stats.files_changed, 0);
    assert!(stats.reports.is_empty());
    assert_eq!(fs::read_to_string(&input).unwrap(), PLAIN);
}
