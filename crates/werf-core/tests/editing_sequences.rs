//! Integration tests for realistic editing sequences.
//!
//! These drive the editor the way a front end would and check that the
//! document, the selection and the undo history stay in step.

use werf_buffer::{Address, Range, TextBuffer};
use werf_core::{Command, Config, Editor};

fn editor_with(text: &str) -> Editor {
    Editor::with_buffer(TextBuffer::from(text), Config::default())
}

#[test]
fn test_type_word_then_backspace_entirely() {
    let mut editor = Editor::new();

    for ch in ["h", "e", "l", "l", "o"] {
        editor.type_text(ch.as_bytes()).unwrap();
    }
    assert_eq!(editor.buffer().text(), "hello");
    assert_eq!(editor.range(), Range::caret(Address::new(0, 5)));
    assert_eq!(editor.buffer().undo_depth(), 1);

    for _ in 0..5 {
        editor.backspace().unwrap();
    }
    assert!(editor.buffer().is_empty());
    assert_eq!(editor.range(), Range::caret(Address::ZERO));
    // One step for the typing, one for the backspace run
    assert_eq!(editor.buffer().undo_depth(), 2);

    assert!(editor.undo().unwrap());
    assert_eq!(editor.buffer().text(), "hello");
    assert!(editor.undo().unwrap());
    assert_eq!(editor.buffer().text(), "");
    assert!(!editor.undo().unwrap());
}

#[test]
fn test_typing_across_lines_is_one_step() {
    let mut editor = Editor::new();

    editor.type_text(b"first").unwrap();
    editor.new_line().unwrap();
    editor.type_text(b"second").unwrap();

    assert_eq!(editor.buffer().text(), "first\nsecond");
    assert_eq!(editor.buffer().len_lines(), 2);
    assert_eq!(editor.range(), Range::caret(Address::new(1, 6)));
    assert_eq!(editor.buffer().undo_depth(), 1);

    editor.undo().unwrap();
    assert_eq!(editor.buffer().text(), "");
}

#[test]
fn test_backward_selection_cut_and_paste() {
    let mut editor = editor_with("alpha beta");

    editor.select(Address::new(0, 10), Address::new(0, 6)).unwrap();
    assert!(editor.is_backward());
    assert_eq!(editor.head(), Address::new(0, 6));

    editor.cut().unwrap();
    assert_eq!(editor.buffer().text(), "alpha ");
    assert_eq!(editor.clipboard(), b"beta");

    editor.move_to_file_start();
    editor.paste().unwrap();
    assert_eq!(editor.buffer().text(), "betaalpha ");

    editor.undo().unwrap();
    assert_eq!(editor.buffer().text(), "alpha ");
    editor.undo().unwrap();
    assert_eq!(editor.buffer().text(), "alpha beta");
    editor.redo().unwrap();
    assert_eq!(editor.buffer().text(), "alpha ");
}

#[test]
fn test_command_sequence() {
    let mut editor = Editor::new();
    let commands = [
        Command::InsertText { text: "ab".into() },
        Command::MoveLeft,
        Command::Backspace,
        Command::MoveToLineEnd,
        Command::NewLine,
        Command::InsertText { text: "c".into() },
    ];
    for cmd in &commands {
        editor.execute(cmd).unwrap();
    }
    assert_eq!(editor.buffer().text(), "b\nc");

    editor.execute(&Command::SelectAll).unwrap();
    editor.execute(&Command::Delete).unwrap();
    assert!(editor.buffer().is_empty());

    editor.execute(&Command::Undo).unwrap();
    assert_eq!(editor.buffer().text(), "b\nc");
}

#[test]
fn test_combining_mark_moves_as_one() {
    let mut editor = editor_with("e\u{301}x");

    editor.move_right().unwrap();
    assert_eq!(editor.range(), Range::caret(Address::new(0, 3)));

    editor.delete().unwrap();
    assert_eq!(editor.buffer().text(), "e\u{301}");

    editor.backspace().unwrap();
    assert!(editor.buffer().is_empty());
}

#[test]
fn test_typing_without_coalescing() {
    let mut config = Config::default();
    config.editor.coalesce_typing = false;
    let mut editor = Editor::with_config(config);

    editor.type_text(b"a").unwrap();
    editor.type_text(b"b").unwrap();
    assert_eq!(editor.buffer().undo_depth(), 2);

    editor.undo().unwrap();
    assert_eq!(editor.buffer().text(), "a");
}

#[test]
fn test_undo_limit_from_config() {
    let mut config = Config::default();
    config.editor.undo_limit = 2;
    config.editor.coalesce_typing = false;
    let mut editor = Editor::with_config(config);

    for word in ["one ", "two ", "three"] {
        editor.type_text(word.as_bytes()).unwrap();
    }
    assert_eq!(editor.buffer().undo_depth(), 2);

    editor.undo().unwrap();
    editor.undo().unwrap();
    assert!(!editor.undo().unwrap());
    assert_eq!(editor.buffer().text(), "one ");
}

#[test]
fn test_open_edit_save() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "hello\n").unwrap();

    let mut editor = Editor::new();
    editor.open(&path).unwrap();
    assert_eq!(editor.buffer().len_lines(), 2);

    editor.move_to_file_end();
    editor.type_text(b"world").unwrap();
    assert!(editor.has_unsaved_changes());

    editor.save().unwrap();
    assert!(!editor.has_unsaved_changes());
    assert_eq!(std::fs::read(&path).unwrap(), b"hello\nworld");
}
