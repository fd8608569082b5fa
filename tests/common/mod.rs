//! In-memory page used by the integration tests.
//!
//! Models just enough of a browser for the clipboard helpers: a handful of
//! form inputs and editable elements, a focused element, a document selection,
//! a clipboard, and the permission switches that make engines differ.

#![allow(dead_code)]

use async_trait::async_trait;
use pageclip::{Engine, Modifier, PageDriver, PageError, PageScript};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Input,
    TextArea,
    Editable,
}

#[derive(Debug, Clone)]
struct Element {
    kind: Kind,
    value: String,
    markup: String,
    selection: (usize, usize),
}

impl Element {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            value: String::new(),
            markup: String::new(),
            selection: (0, 0),
        }
    }

    fn is_form(&self) -> bool {
        matches!(self.kind, Kind::Input | Kind::TextArea)
    }
}

#[derive(Default)]
struct State {
    elements: HashMap<String, Element>,
    focused: Option<String>,
    clipboard: String,
    document_selection: String,
    pressed: Vec<String>,
    scripts: Vec<PageScript>,
    scratch_mounts: usize,
    value_reads: usize,
    waited: Duration,
}

pub struct FakePage {
    engine: Engine,
    modifier: Modifier,
    clipboard_api: bool,
    exec_command: bool,
    fail_press: bool,
    fail_script: Option<PageScript>,
    state: Mutex<State>,
}

impl FakePage {
    /// The demo page: `#source`, `#target`, `#text` inputs, an `#editor`
    /// textarea and two editable divs, `#richSource` and `#richTarget`.
    ///
    /// Only chromium grants the async Clipboard API; webkit allows the legacy
    /// `execCommand` path.
    pub fn new(engine: Engine) -> Self {
        let mut elements = HashMap::new();
        for id in ["#source", "#target", "#text"] {
            elements.insert(id.to_string(), Element::new(Kind::Input));
        }
        elements.insert("#editor".to_string(), Element::new(Kind::TextArea));
        for id in ["#richSource", "#richTarget"] {
            elements.insert(id.to_string(), Element::new(Kind::Editable));
        }

        Self {
            engine,
            modifier: Modifier::platform(),
            clipboard_api: engine == Engine::Chromium,
            exec_command: engine == Engine::Webkit,
            fail_press: false,
            fail_script: None,
            state: Mutex::new(State {
                elements,
                ..State::default()
            }),
        }
    }

    pub fn with_clipboard_api(mut self, enabled: bool) -> Self {
        self.clipboard_api = enabled;
        self
    }

    pub fn with_exec_command(mut self, enabled: bool) -> Self {
        self.exec_command = enabled;
        self
    }

    pub fn with_modifier(mut self, modifier: Modifier) -> Self {
        self.modifier = modifier;
        self
    }

    pub fn failing_key_presses(mut self) -> Self {
        self.fail_press = true;
        self
    }

    pub fn failing_script(mut self, script: PageScript) -> Self {
        self.fail_script = Some(script);
        self
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn set_value(&self, selector: &str, text: &str) {
        let mut state = self.state();
        let element = state.elements.get_mut(selector).unwrap();
        element.value = text.to_string();
    }

    pub fn value(&self, selector: &str) -> String {
        self.state().elements[selector].value.clone()
    }

    pub fn set_markup(&self, selector: &str, markup: &str) {
        let mut state = self.state();
        let element = state.elements.get_mut(selector).unwrap();
        element.markup = markup.to_string();
    }

    pub fn markup(&self, selector: &str) -> String {
        self.state().elements[selector].markup.clone()
    }

    pub fn text_content(&self, selector: &str) -> String {
        strip_tags(&self.markup(selector))
    }

    pub fn clipboard(&self) -> String {
        self.state().clipboard.clone()
    }

    pub fn set_clipboard(&self, text: &str) {
        self.state().clipboard = text.to_string();
    }

    pub fn has_element(&self, selector: &str) -> bool {
        self.state().elements.contains_key(selector)
    }

    pub fn pressed(&self) -> Vec<String> {
        self.state().pressed.clone()
    }

    pub fn scripts(&self) -> Vec<PageScript> {
        self.state().scripts.clone()
    }

    pub fn scratch_mounts(&self) -> usize {
        self.state().scratch_mounts
    }

    /// Number of `input_value` calls made so far.
    pub fn value_reads(&self) -> usize {
        self.state().value_reads
    }

    pub fn waited(&self) -> Duration {
        self.state().waited
    }

    fn press_key(&self, state: &mut State, key: char) {
        let Some(focused) = state.focused.clone() else {
            return;
        };
        let clipboard = state.clipboard.clone();
        let Some(element) = state.elements.get_mut(&focused) else {
            return;
        };

        if element.is_form() {
            let (start, end) = element.selection;
            match key {
                'A' => element.selection = (0, utf16_len(&element.value)),
                'C' => state.clipboard = utf16_slice(&element.value, start, end),
                'X' => {
                    let taken = utf16_slice(&element.value, start, end);
                    element.value = utf16_splice(&element.value, start, end, "");
                    element.selection = (start, start);
                    state.clipboard = taken;
                }
                'V' => {
                    element.value = utf16_splice(&element.value, start, end, &clipboard);
                    let caret = start + utf16_len(&clipboard);
                    element.selection = (caret, caret);
                }
                _ => {}
            }
            return;
        }

        let text = strip_tags(&element.markup);
        match key {
            'A' => state.document_selection = text,
            'C' => state.clipboard = text,
            'X' => {
                element.markup.clear();
                state.clipboard = text;
                state.document_selection.clear();
            }
            'V' => {
                element.markup = clipboard;
                state.document_selection.clear();
            }
            _ => {}
        }
    }

    fn run_script(&self, script: PageScript, args: &Value) -> Result<Value, String> {
        let mut state = self.state();
        let selector = args["selector"].as_str().unwrap_or_default().to_string();

        match script {
            PageScript::ReadMarkup => {
                let element = element(&state, &selector)?;
                Ok(json!(element.markup))
            }
            PageScript::WriteMarkup => {
                let content = args["content"].as_str().unwrap_or_default().to_string();
                element_mut(&mut state, &selector)?.markup = content;
                Ok(Value::Null)
            }
            PageScript::TakeMarkup => {
                let element = element_mut(&mut state, &selector)?;
                Ok(json!(std::mem::take(&mut element.markup)))
            }
            PageScript::ReadClipboard => {
                if !self.clipboard_api {
                    return Err("NotAllowedError: Read permission denied.".to_string());
                }
                Ok(json!(state.clipboard))
            }
            PageScript::WriteClipboard => {
                if !self.clipboard_api {
                    return Err("NotAllowedError: Write permission denied.".to_string());
                }
                state.clipboard = args["text"].as_str().unwrap_or_default().to_string();
                Ok(Value::Null)
            }
            PageScript::MountScratch => {
                let id = format!("#{}", args["id"].as_str().unwrap_or_default());
                let mut scratch = Element::new(Kind::TextArea);
                scratch.value = args["text"].as_str().unwrap_or_default().to_string();
                state.elements.insert(id, scratch);
                state.scratch_mounts += 1;
                Ok(Value::Null)
            }
            PageScript::UnmountScratch => {
                let id = format!("#{}", args["id"].as_str().unwrap_or_default());
                state.elements.remove(&id);
                if state.focused.as_deref() == Some(id.as_str()) {
                    state.focused = None;
                }
                Ok(Value::Null)
            }
            PageScript::SelectRange => {
                let start = args["start"].as_u64().unwrap_or_default() as usize;
                let end = args["end"].as_u64().unwrap_or_default() as usize;
                let element = element_mut(&mut state, &selector)?;
                if element.is_form() {
                    let len = utf16_len(&element.value);
                    element.selection = (start.min(len), end.min(len));
                    state.focused = Some(selector);
                    return Ok(Value::Null);
                }

                let markup = element.markup.clone();
                let selected = match markup.find('<') {
                    // First child is a text node: select inside it.
                    Some(first_tag) if first_tag > 0 => {
                        utf16_slice(&markup[..first_tag], start, end)
                    }
                    None if !markup.is_empty() => utf16_slice(&markup, start, end),
                    _ => strip_tags(&markup),
                };
                state.document_selection = selected;
                state.focused = Some(selector);
                Ok(Value::Null)
            }
            PageScript::SelectedText => {
                let focused = state
                    .focused
                    .as_ref()
                    .and_then(|sel| state.elements.get(sel))
                    .filter(|element| element.is_form());
                match focused {
                    Some(element) => {
                        let (start, end) = element.selection;
                        Ok(json!(utf16_slice(&element.value, start, end)))
                    }
                    None => Ok(json!(state.document_selection)),
                }
            }
            PageScript::DocumentSelection => Ok(json!(state.document_selection)),
            PageScript::ExecCommand => {
                if !self.exec_command {
                    return Ok(json!(false));
                }
                let command = args["command"].as_str().unwrap_or_default().to_string();
                let clipboard = state.clipboard.clone();
                let element = element_mut(&mut state, &selector)?;
                let copied = match command.as_str() {
                    "copy" => Some(element.markup.clone()),
                    "cut" => Some(std::mem::take(&mut element.markup)),
                    "paste" => {
                        element.markup = clipboard;
                        None
                    }
                    _ => return Ok(json!(false)),
                };
                if let Some(copied) = copied {
                    state.clipboard = copied;
                }
                Ok(json!(true))
            }
        }
    }
}

fn element<'a>(state: &'a State, selector: &str) -> Result<&'a Element, String> {
    state
        .elements
        .get(selector)
        .ok_or_else(|| format!("Element not found: {}", selector))
}

fn element_mut<'a>(state: &'a mut State, selector: &str) -> Result<&'a mut Element, String> {
    state
        .elements
        .get_mut(selector)
        .ok_or_else(|| format!("Element not found: {}", selector))
}

#[async_trait]
impl PageDriver for FakePage {
    async fn engine(&self) -> Result<Engine, PageError> {
        Ok(self.engine)
    }

    async fn focus(&self, selector: &str) -> Result<(), PageError> {
        let mut state = self.state();
        if !state.elements.contains_key(selector) {
            return Err(PageError::ElementNotFound(selector.to_string()));
        }
        state.focused = Some(selector.to_string());
        Ok(())
    }

    async fn click(&self, selector: &str) -> Result<(), PageError> {
        self.focus(selector).await
    }

    async fn fill(&self, selector: &str, text: &str) -> Result<(), PageError> {
        let mut state = self.state();
        let element = state
            .elements
            .get_mut(selector)
            .ok_or_else(|| PageError::ElementNotFound(selector.to_string()))?;
        if element.is_form() {
            element.value = text.to_string();
            let len = utf16_len(text);
            element.selection = (len, len);
        } else {
            element.markup = text.to_string();
        }
        Ok(())
    }

    async fn input_value(&self, selector: &str) -> Result<String, PageError> {
        let mut state = self.state();
        state.value_reads += 1;
        let element = state
            .elements
            .get(selector)
            .ok_or_else(|| PageError::ElementNotFound(selector.to_string()))?;
        if !element.is_form() {
            return Err(PageError::Other(
                "Node is not an <input>, <textarea> or <select> element".to_string(),
            ));
        }
        Ok(element.value.clone())
    }

    async fn press(&self, combo: &str) -> Result<(), PageError> {
        if self.fail_press {
            return Err(PageError::Keyboard {
                combo: combo.to_string(),
                message: "keyboard unavailable".to_string(),
            });
        }
        let mut state = self.state();
        state.pressed.push(combo.to_string());

        let Some((modifier, key)) = combo.split_once('+') else {
            return Ok(());
        };
        let mut chars = key.chars();
        if modifier != self.modifier.as_str() {
            return Ok(());
        }
        if let (Some(key), None) = (chars.next(), chars.next()) {
            self.press_key(&mut state, key.to_ascii_uppercase());
        }
        Ok(())
    }

    async fn evaluate(&self, script: PageScript, args: Value) -> Result<Value, PageError> {
        self.state().scripts.push(script);
        if self.fail_script == Some(script) {
            return Err(PageError::Script {
                name: script.name(),
                message: "injected failure".to_string(),
            });
        }
        self.run_script(script, &args)
            .map_err(|message| PageError::Script {
                name: script.name(),
                message,
            })
    }

    async fn wait(&self, duration: Duration) -> Result<(), PageError> {
        self.state().waited += duration;
        Ok(())
    }
}

pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for c in markup.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn utf16_slice(s: &str, start: usize, end: usize) -> String {
    let units: Vec<u16> = s.encode_utf16().collect();
    let end = end.min(units.len());
    let start = start.min(end);
    String::from_utf16_lossy(&units[start..end])
}

fn utf16_splice(s: &str, start: usize, end: usize, insert: &str) -> String {
    let units: Vec<u16> = s.encode_utf16().collect();
    let end = end.min(units.len());
    let start = start.min(end);
    let mut out = units[..start].to_vec();
    out.extend(insert.encode_utf16());
    out.extend_from_slice(&units[end..]);
    String::from_utf16_lossy(&out)
}
