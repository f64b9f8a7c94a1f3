use pagecraft_common::{registry, IdGenerator, PageDocument, Props};
use pagecraft_compiler_react::{compile_page, CompileOptions, GeneratedPage};
use pagecraft_editor::{DragSource, DropTarget, PageStore, Viewport};
use serde_json::json;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Page editing session driven by the browser canvas
#[wasm_bindgen]
pub struct PageEditor {
    store: PageStore,
}

#[wasm_bindgen]
impl PageEditor {
    /// `seed` must differ between sessions that edit the same page
    #[wasm_bindgen(constructor)]
    pub fn new(seed: &str) -> PageEditor {
        PageEditor {
            store: PageStore::with_id_generator(IdGenerator::from_seed(seed)),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u64 {
        self.store.version()
    }

    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, block_type: &str, index: Option<usize>) -> Result<String, JsValue> {
        self.store.add_block(block_type, index).map_err(js_error)
    }

    #[wasm_bindgen(js_name = removeBlock)]
    pub fn remove_block(&mut self, block_id: &str) {
        self.store.remove_block(block_id);
    }

    #[wasm_bindgen(js_name = moveBlock)]
    pub fn move_block(&mut self, from_index: usize, to_index: usize) {
        self.store.move_block(from_index, to_index);
    }

    #[wasm_bindgen(js_name = duplicateBlock)]
    pub fn duplicate_block(&mut self, block_id: &str) -> Option<String> {
        self.store.duplicate_block(block_id)
    }

    /// `props` is a JSON object merged into the block's properties
    #[wasm_bindgen(js_name = updateBlockProps)]
    pub fn update_block_props(&mut self, block_id: &str, props: &str) -> Result<(), JsValue> {
        let props: Props = serde_json::from_str(props).map_err(js_error)?;
        self.store.update_block_props(block_id, props);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectBlock)]
    pub fn select_block(&mut self, block_id: Option<String>) {
        self.store.select_block(block_id.as_deref());
    }

    #[wasm_bindgen(getter, js_name = selectedBlockId)]
    pub fn selected_block_id(&self) -> Option<String> {
        self.store.selected_block_id().map(str::to_string)
    }

    #[wasm_bindgen(js_name = togglePreview)]
    pub fn toggle_preview(&mut self) {
        self.store.toggle_preview();
    }

    #[wasm_bindgen(getter, js_name = isPreviewMode)]
    pub fn is_preview_mode(&self) -> bool {
        self.store.session().is_preview_mode
    }

    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, viewport: &str) -> Result<(), JsValue> {
        let viewport: Viewport = viewport.parse().map_err(js_error)?;
        self.store.set_viewport(viewport);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn viewport(&self) -> String {
        self.store.session().viewport.to_string()
    }

    /// Canvas width cap in pixels, `undefined` for full width
    #[wasm_bindgen(getter, js_name = viewportMaxWidth)]
    pub fn viewport_max_width(&self) -> Option<u32> {
        self.store.session().viewport.max_width()
    }

    #[wasm_bindgen(js_name = beginDrag)]
    pub fn begin_drag(&mut self) {
        self.store.begin_drag();
    }

    #[wasm_bindgen(getter, js_name = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.store.session().is_dragging
    }

    /// Finish dragging a palette item. `over_id` is the drop target's id:
    /// a block id, any other id for the canvas, nothing when cancelled.
    /// Returns whether the page changed.
    #[wasm_bindgen(js_name = dropNewBlock)]
    pub fn drop_new_block(&mut self, block_type: &str, over_id: Option<String>) -> Result<bool, JsValue> {
        let source = DragSource::Palette {
            block_type: block_type.to_string(),
        };
        self.end_drag(source, over_id)
    }

    /// Finish reordering `block_id` onto `over_id`
    #[wasm_bindgen(js_name = dropBlock)]
    pub fn drop_block(&mut self, block_id: &str, over_id: Option<String>) -> Result<bool, JsValue> {
        let source = DragSource::Block {
            block_id: block_id.to_string(),
        };
        self.end_drag(source, over_id)
    }

    #[wasm_bindgen(js_name = clearPage)]
    pub fn clear_page(&mut self) {
        self.store.clear_page();
    }

    #[wasm_bindgen(js_name = exportPage)]
    pub fn export_page(&self) -> Result<String, JsValue> {
        self.store.export_page().map_err(js_error)
    }

    #[wasm_bindgen(js_name = importPage)]
    pub fn import_page(&mut self, json: &str) -> Result<(), JsValue> {
        self.store.import_page(json).map_err(js_error)
    }

    /// Export the current page to React source and image files
    pub fn compile(&self, image_dir: Option<String>, include_header: bool) -> CompileResult {
        CompileResult::from(compile_page(
            self.store.document(),
            &compile_options(image_dir, include_header),
        ))
    }
}

impl PageEditor {
    fn end_drag(&mut self, source: DragSource, over_id: Option<String>) -> Result<bool, JsValue> {
        let target = over_id.map(|id| {
            if self.store.document().contains_block(&id) {
                DropTarget::Block { block_id: id }
            } else {
                DropTarget::EmptyCanvas
            }
        });

        let result = self.store.end_drag(source, target).map_err(js_error)?;
        Ok(result.is_some())
    }
}

fn compile_options(image_dir: Option<String>, include_header: bool) -> CompileOptions {
    let defaults = CompileOptions::default();
    CompileOptions {
        image_dir: image_dir.unwrap_or(defaults.image_dir),
        include_header,
    }
}

#[wasm_bindgen]
pub struct CompileResult {
    page: GeneratedPage,
}

impl From<GeneratedPage> for CompileResult {
    fn from(page: GeneratedPage) -> Self {
        Self { page }
    }
}

#[wasm_bindgen]
impl CompileResult {
    #[wasm_bindgen(getter)]
    pub fn code(&self) -> String {
        self.page.code.clone()
    }

    #[wasm_bindgen(getter, js_name = assetCount)]
    pub fn asset_count(&self) -> usize {
        self.page.assets.len()
    }

    #[wasm_bindgen(js_name = assetFilename)]
    pub fn asset_filename(&self, index: usize) -> Option<String> {
        self.page.assets.get(index).map(|a| a.filename.clone())
    }

    /// Decoded image bytes (a `Uint8Array` in JS)
    #[wasm_bindgen(js_name = assetData)]
    pub fn asset_data(&self, index: usize) -> Option<Vec<u8>> {
        self.page.assets.get(index).map(|a| a.data.clone())
    }

    /// Export warnings as a JSON array
    #[wasm_bindgen(getter)]
    pub fn warnings(&self) -> String {
        serde_json::to_string(&self.page.warnings).unwrap_or_else(|_| "[]".to_string())
    }
}

/// Compile a page document given as JSON
#[wasm_bindgen(js_name = compilePage)]
pub fn compile_page_js(json: &str, image_dir: Option<String>, include_header: bool) -> Result<CompileResult, JsValue> {
    let document: PageDocument = serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Malformed document: {}", e)))?;

    Ok(compile_page(&document, &compile_options(image_dir, include_header)).into())
}

/// Block palette as a JSON array, in palette order
#[wasm_bindgen(js_name = blockRegistry)]
pub fn block_registry_js() -> String {
    let entries: Vec<_> = registry::entries()
        .map(|entry| {
            json!({
                "type": entry.block_type,
                "name": entry.name,
                "description": entry.description,
                "category": entry.category,
                "icon": entry.icon,
                "defaultProps": entry.default_props(),
            })
        })
        .collect();

    serde_json::Value::Array(entries).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_edit_and_compile() {
        let mut editor = PageEditor::new("js");

        let hero = editor.add_block("heroSection", None).unwrap();
        editor.add_block("footer", None).unwrap();
        editor.move_block(1, 0);
        editor
            .update_block_props(&hero, r#"{ "image": "data:image/png;base64,iVBORw0KGgo=" }"#)
            .unwrap();

        let result = editor.compile(None, false);

        assert!(result.code().find("<Footer").unwrap() < result.code().find("<HeroSection").unwrap());
        assert_eq!(result.asset_count(), 1);
        assert!(result.asset_filename(0).unwrap().starts_with("images/img-"));
        assert_eq!(result.asset_data(0).unwrap().len(), 8);
        assert_eq!(result.warnings(), "[]");
    }

    #[test]
    fn test_drag_and_drop() {
        let mut editor = PageEditor::new("js");
        let navbar = editor.add_block("navbar", None).unwrap();

        editor.begin_drag();
        assert!(editor.is_dragging());
        assert!(editor.drop_new_block("heroSection", Some(navbar.clone())).unwrap());
        assert!(!editor.is_dragging());

        assert!(!editor.drop_block(&navbar, None).unwrap());
        assert!(editor.drop_new_block("footer", Some("canvas".to_string())).unwrap());

        let page: Value = serde_json::from_str(&editor.export_page().unwrap()).unwrap();
        let types: Vec<&str> = page["blocks"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["heroSection", "navbar", "footer"]);
    }

    #[test]
    fn test_session_state() {
        let mut editor = PageEditor::new("js");
        let id = editor.add_block("navbar", None).unwrap();
        assert_eq!(editor.selected_block_id(), Some(id));

        editor.toggle_preview();
        assert!(editor.is_preview_mode());
        assert_eq!(editor.selected_block_id(), None);

        editor.set_viewport("mobile").unwrap();
        assert_eq!(editor.viewport(), "mobile");
        assert_eq!(editor.viewport_max_width(), Some(384));
    }

    #[test]
    fn test_round_trip_between_editors() {
        let mut first = PageEditor::new("a");
        first.add_block("pricingTable", None).unwrap();

        let mut second = PageEditor::new("b");
        second.import_page(&first.export_page().unwrap()).unwrap();

        assert_eq!(second.export_page().unwrap(), first.export_page().unwrap());
    }

    #[test]
    fn test_block_registry_lists_every_type() {
        let registry: Value = serde_json::from_str(&block_registry_js()).unwrap();
        let entries = registry.as_array().unwrap();

        assert_eq!(entries.len(), 16);
        assert_eq!(entries[0]["type"], "navbar");
        assert_eq!(entries[0]["category"], "layout");
    }
}
