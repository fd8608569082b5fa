//! In-page scripts evaluated through [`crate::PageDriver::evaluate`].
//!
//! Each source is a function expression taking a single argument object, so a
//! driver can hand it to its runtime's `evaluate(fn, arg)` unchanged. The
//! argument shape for each script is listed on its variant.

/// A script the clipboard strategies run inside the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageScript {
    /// `{ selector }` -> element `innerHTML`.
    ReadMarkup,
    /// `{ selector, content }` -> `null`. Sets `innerHTML` and fires `input` and `change`.
    WriteMarkup,
    /// `{ selector }` -> previous `innerHTML`, leaving the element empty.
    TakeMarkup,
    /// `{}` -> `navigator.clipboard.readText()`.
    ReadClipboard,
    /// `{ text }` -> `null` via `navigator.clipboard.writeText()`.
    WriteClipboard,
    /// `{ id, text }` -> `null`. Appends an invisible fixed-position textarea.
    MountScratch,
    /// `{ id }` -> `null`. Removes the scratch textarea if present.
    UnmountScratch,
    /// `{ selector, start, end }` -> `null`.
    SelectRange,
    /// `{}` -> selected text of the active form element, else the document selection.
    SelectedText,
    /// `{}` -> `window.getSelection().toString()`.
    DocumentSelection,
    /// `{ selector, command }` -> whether `document.execCommand(command)` succeeded
    /// with the element's contents selected.
    ExecCommand,
}

impl PageScript {
    pub const ALL: [PageScript; 11] = [
        PageScript::ReadMarkup,
        PageScript::WriteMarkup,
        PageScript::TakeMarkup,
        PageScript::ReadClipboard,
        PageScript::WriteClipboard,
        PageScript::MountScratch,
        PageScript::UnmountScratch,
        PageScript::SelectRange,
        PageScript::SelectedText,
        PageScript::DocumentSelection,
        PageScript::ExecCommand,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageScript::ReadMarkup => "read-markup",
            PageScript::WriteMarkup => "write-markup",
            PageScript::TakeMarkup => "take-markup",
            PageScript::ReadClipboard => "read-clipboard",
            PageScript::WriteClipboard => "write-clipboard",
            PageScript::MountScratch => "mount-scratch",
            PageScript::UnmountScratch => "unmount-scratch",
            PageScript::SelectRange => "select-range",
            PageScript::SelectedText => "selected-text",
            PageScript::DocumentSelection => "document-selection",
            PageScript::ExecCommand => "exec-command",
        }
    }

    pub fn source(self) -> &'static str {
        match self {
            PageScript::ReadMarkup => READ_MARKUP,
            PageScript::WriteMarkup => WRITE_MARKUP,
            PageScript::TakeMarkup => TAKE_MARKUP,
            PageScript::ReadClipboard => READ_CLIPBOARD,
            PageScript::WriteClipboard => WRITE_CLIPBOARD,
            PageScript::MountScratch => MOUNT_SCRATCH,
            PageScript::UnmountScratch => UNMOUNT_SCRATCH,
            PageScript::SelectRange => SELECT_RANGE,
            PageScript::SelectedText => SELECTED_TEXT,
            PageScript::DocumentSelection => DOCUMENT_SELECTION,
            PageScript::ExecCommand => EXEC_COMMAND,
        }
    }
}

const READ_MARKUP: &str = r#"({ selector }) => {
  const element = document.querySelector(selector);
  if (!element) throw new Error(`Element not found: ${selector}`);
  return element.innerHTML;
}"#;

const WRITE_MARKUP: &str = r#"({ selector, content }) => {
  const element = document.querySelector(selector);
  if (!(element instanceof HTMLElement)) throw new Error(`Element not found: ${selector}`);
  element.innerHTML = content;
  element.dispatchEvent(new Event('input', { bubbles: true }));
  element.dispatchEvent(new Event('change', { bubbles: true }));
  return null;
}"#;

const TAKE_MARKUP: &str = r#"({ selector }) => {
  const element = document.querySelector(selector);
  if (!element) throw new Error(`Element not found: ${selector}`);
  const content = element.innerHTML;
  element.innerHTML = '';
  return content;
}"#;

const READ_CLIPBOARD: &str = r#"() => navigator.clipboard.readText()"#;

const WRITE_CLIPBOARD: &str = r#"async ({ text }) => {
  await navigator.clipboard.writeText(text);
  return null;
}"#;

const MOUNT_SCRATCH: &str = r#"({ id, text }) => {
  const scratch = document.createElement('textarea');
  scratch.id = id;
  scratch.style.position = 'fixed';
  scratch.style.top = '0';
  scratch.style.left = '0';
  scratch.style.opacity = '0';
  scratch.value = text ?? '';
  document.body.appendChild(scratch);
  return null;
}"#;

const UNMOUNT_SCRATCH: &str = r#"({ id }) => {
  const scratch = document.getElementById(id);
  if (scratch) scratch.remove();
  return null;
}"#;

const SELECT_RANGE: &str = r#"({ selector, start, end }) => {
  const element = document.querySelector(selector);
  if (!element) throw new Error(`Element not found: ${selector}`);
  if (element instanceof HTMLElement) element.focus();

  if (element instanceof HTMLInputElement || element instanceof HTMLTextAreaElement) {
    element.setSelectionRange(start, end);
    element.dispatchEvent(new Event('select', { bubbles: true }));
    return null;
  }

  const selection = window.getSelection();
  if (!selection) throw new Error('Selection unavailable');
  const range = document.createRange();
  const first = element.firstChild;
  if (first && first.nodeType === Node.TEXT_NODE) {
    range.setStart(first, start);
    range.setEnd(first, end);
  } else {
    range.selectNodeContents(element);
  }
  selection.removeAllRanges();
  selection.addRange(range);
  return null;
}"#;

const SELECTED_TEXT: &str = r#"() => {
  const element = document.activeElement;
  if (element instanceof HTMLInputElement || element instanceof HTMLTextAreaElement) {
    return element.value.substring(element.selectionStart || 0, element.selectionEnd || 0);
  }
  const selection = window.getSelection();
  return selection ? selection.toString() : '';
}"#;

const DOCUMENT_SELECTION: &str = r#"() => {
  const selection = window.getSelection();
  return selection ? selection.toString() : '';
}"#;

const EXEC_COMMAND: &str = r#"({ selector, command }) => {
  const element = document.querySelector(selector);
  if (!(element instanceof HTMLElement)) throw new Error(`Element not found: ${selector}`);
  element.focus();
  const selection = window.getSelection();
  if (selection) {
    const range = document.createRange();
    range.selectNodeContents(element);
    selection.removeAllRanges();
    selection.addRange(range);
  }
  return document.execCommand(command);
}"#;
