//! Схема процесса на bpmn-js (NavigatedViewer)
//!
//! Скрипт просмотрщика подгружается при первом показе схемы. Если схема
//! не отрисовалась, панель показывает текущий шаг обычной подписью.

use contracts::system::workflow::bpmn::{highlight_target, HIGHLIGHT_MARKER};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

const BPMN_VIEWER_URL: &str =
    "https://unpkg.com/bpmn-js@17.11.1/dist/bpmn-navigated-viewer.production.min.js";
const BPMN_GLOBAL: &str = "BpmnJS";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = BpmnJS)]
    type BpmnViewer;

    #[wasm_bindgen(constructor, js_class = "BpmnJS", catch)]
    fn new(options: &JsValue) -> Result<BpmnViewer, JsValue>;

    #[wasm_bindgen(method, js_name = importXML)]
    fn import_xml(this: &BpmnViewer, xml: &str) -> js_sys::Promise;

    #[wasm_bindgen(method, js_name = get)]
    fn service(this: &BpmnViewer, name: &str) -> BpmnCanvas;

    #[wasm_bindgen(method)]
    fn destroy(this: &BpmnViewer);

    type BpmnCanvas;

    #[wasm_bindgen(method, catch, js_name = addMarker)]
    fn add_marker(this: &BpmnCanvas, element_id: &str, marker: &str) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn zoom(this: &BpmnCanvas, mode: &str);
}

/// Что показывать на месте схемы
#[derive(Debug, Clone, PartialEq)]
pub enum DiagramMode {
    /// У определения нет BPMN
    NoDiagram,
    /// Схема есть, но текущего шага на ней нет
    Unmarked,
    /// Схема с подсветкой элемента
    Highlight(String),
}

pub fn diagram_mode(bpmn_xml: &str, step_id: &str) -> DiagramMode {
    if bpmn_xml.trim().is_empty() {
        return DiagramMode::NoDiagram;
    }
    match highlight_target(bpmn_xml, step_id) {
        Some(id) => DiagramMode::Highlight(id.to_string()),
        None => DiagramMode::Unmarked,
    }
}

fn js_error(err: JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Подключает скрипт bpmn-js, если он ещё не загружен
async fn ensure_viewer_script() -> Result<(), String> {
    let window = web_sys::window().ok_or_else(|| "window недоступен".to_string())?;
    if js_sys::Reflect::has(&window, &JsValue::from_str(BPMN_GLOBAL)).unwrap_or(false) {
        return Ok(());
    }

    let document = window.document().ok_or_else(|| "document недоступен".to_string())?;
    let script: web_sys::HtmlScriptElement = document
        .create_element("script")
        .map_err(js_error)?
        .dyn_into()
        .map_err(|_| "не удалось создать script".to_string())?;
    script.set_src(BPMN_VIEWER_URL);

    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        script.set_onload(Some(&resolve));
        script.set_onerror(Some(&reject));
    });

    let head = document.head().ok_or_else(|| "head недоступен".to_string())?;
    head.append_child(&script).map_err(js_error)?;

    JsFuture::from(loaded)
        .await
        .map_err(|_| format!("не удалось загрузить {}", BPMN_VIEWER_URL))?;
    log::debug!("bpmn-js loaded");
    Ok(())
}

/// Результат `importXML`: схема открылась, но с замечаниями
#[derive(Debug, Default, Deserialize)]
struct ImportResult {
    #[serde(default)]
    warnings: Vec<ImportWarning>,
}

#[derive(Debug, Deserialize)]
struct ImportWarning {
    #[serde(default)]
    message: String,
}

fn log_import_warnings(result: JsValue) {
    let parsed: ImportResult = serde_wasm_bindgen::from_value(result).unwrap_or_default();
    for w in parsed.warnings {
        log::warn!("BPMN import: {}", w.message);
    }
}

async fn render(
    container: &web_sys::HtmlDivElement,
    bpmn_xml: &str,
    marker: Option<&str>,
) -> Result<BpmnViewer, String> {
    ensure_viewer_script().await?;

    let options = js_sys::Object::new();
    js_sys::Reflect::set(&options, &JsValue::from_str("container"), container.as_ref())
        .map_err(js_error)?;
    let viewer = BpmnViewer::new(&options).map_err(js_error)?;

    match JsFuture::from(viewer.import_xml(bpmn_xml)).await {
        Ok(result) => log_import_warnings(result),
        Err(err) => {
            viewer.destroy();
            return Err(js_error(err));
        }
    }

    let canvas = viewer.service("canvas");
    canvas.zoom("fit-viewport");
    if let Some(element_id) = marker {
        if let Err(err) = canvas.add_marker(element_id, HIGHLIGHT_MARKER) {
            viewer.destroy();
            return Err(format!("маркер {}: {}", element_id, js_error(err)));
        }
    }
    Ok(viewer)
}

#[component]
pub fn WorkflowDiagram(
    bpmn_xml: String,
    /// Подпись текущего шага для подсказки и запасного вида
    step_label: String,
    step_id: String,
) -> impl IntoView {
    let mode = diagram_mode(&bpmn_xml, &step_id);
    let container = NodeRef::<leptos::html::Div>::new();
    let viewer = StoredValue::new_local(None::<BpmnViewer>);
    let (failure, set_failure) = signal(None::<String>);

    if mode != DiagramMode::NoDiagram {
        let marker = match &mode {
            DiagramMode::Highlight(id) => Some(id.clone()),
            _ => None,
        };
        Effect::new(move |_| {
            let Some(element) = container.get() else {
                return;
            };
            let xml = bpmn_xml.clone();
            let marker = marker.clone();
            spawn_local(async move {
                match render(&element, &xml, marker.as_deref()).await {
                    Ok(v) => match viewer.try_update_value(|slot| slot.replace(v)) {
                        Some(Some(previous)) => previous.destroy(),
                        Some(None) => {}
                        None => log::debug!("workflow diagram disposed before render"),
                    },
                    Err(e) => {
                        log::warn!("BPMN render failed: {}", e);
                        let _ = set_failure.try_set(Some(e));
                    }
                }
            });
        });

        on_cleanup(move || {
            let _ = viewer.try_update_value(|slot| {
                if let Some(v) = slot.take() {
                    v.destroy();
                }
            });
        });
    }

    let label_for_fallback = step_label.clone();

    view! {
        <div class="workflow-diagram">
            {match mode.clone() {
                DiagramMode::NoDiagram => view! {
                    <div class="workflow-diagram__empty">
                        "Схема процесса недоступна. Текущий шаг: " {step_label}
                    </div>
                }
                .into_any(),
                DiagramMode::Unmarked => view! {
                    <div>
                        <div class="workflow-diagram__hint">
                            "Шаг «" {step_label} "» не отмечен на схеме"
                        </div>
                        <div class="workflow-diagram__canvas" node_ref=container></div>
                    </div>
                }
                .into_any(),
                DiagramMode::Highlight(_) => view! {
                    <div class="workflow-diagram__canvas" node_ref=container></div>
                }
                .into_any(),
            }}
            {move || {
                failure
                    .get()
                    .map(|e| {
                        view! {
                            <div class="workflow-diagram__fallback" title=e>
                                "Схему не удалось отобразить. Текущий шаг: "
                                {label_for_fallback.clone()}
                            </div>
                        }
                    })
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<bpmn:process id="P"><bpmn:userTask id="Approve"/></bpmn:process>"#;

    #[test]
    fn test_mode_without_xml() {
        assert_eq!(diagram_mode("  ", "Approve"), DiagramMode::NoDiagram);
    }

    #[test]
    fn test_mode_highlights_known_step() {
        assert_eq!(diagram_mode(XML, "Approve"), DiagramMode::Highlight("Approve".into()));
    }

    #[test]
    fn test_unknown_step_is_not_marked() {
        assert_eq!(diagram_mode(XML, "Pay"), DiagramMode::Unmarked);
        assert_eq!(diagram_mode(XML, ""), DiagramMode::Unmarked);
    }

    #[test]
    fn test_diagram_ids_are_not_marked() {
        let xml = r#"<bpmn:definitions id="Definitions_1"><bpmn:process id="P"><bpmn:userTask id="Approve"/></bpmn:process><bpmndi:BPMNDiagram id="BPMNDiagram_1"/></bpmn:definitions>"#;
        assert_eq!(diagram_mode(xml, "BPMNDiagram_1"), DiagramMode::Unmarked);
        assert_eq!(diagram_mode(xml, "Definitions_1"), DiagramMode::Unmarked);
        assert_eq!(diagram_mode(xml, "Approve"), DiagramMode::Highlight("Approve".into()));
    }
}
