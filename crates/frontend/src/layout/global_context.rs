use crate::layout::tabs::tab_label_for_key;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Состояние оболочки: открытые вкладки, активная вкладка, видимость меню.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub opened: RwSignal<Vec<Tab>>,
    pub active: RwSignal<Option<String>>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            opened: RwSignal::new(vec![]),
            active: RwSignal::new(None),
            left_open: RwSignal::new(true),
        }
    }

    /// Активная вкладка хранится в `?active=<key>`: после перезагрузки
    /// страницы вкладка открывается снова.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(active_key) = params.get("active").cloned() {
            let exists = self
                .opened
                .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == active_key));
            if !exists {
                let title = restored_title(&active_key);
                self.open_tab(&active_key, &title);
            } else {
                self.activate_tab(&active_key);
            }
        }

        let this = *self;
        Effect::new(move |_| {
            let Some(active_key) = this.active.get() else {
                return;
            };
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), active_key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open_tab(&self, key: &str, title: &str) {
        leptos::logging::log!("open_tab: key='{}', title='{}'", key, title);
        let exists = self
            .opened
            .with_untracked(|tabs| tabs.iter().any(|tab| tab.key == key));
        if !exists {
            self.opened.update(|tabs| {
                tabs.push(Tab {
                    key: key.to_string(),
                    title: title.to_string(),
                });
            });
        }
        self.activate_tab(key);
    }

    pub fn activate_tab(&self, key: &str) {
        self.active.set(Some(key.to_string()));
    }

    /// Детальная форма сообщает заголовок после загрузки записи
    pub fn update_tab_title(&self, key: &str, new_title: &str) {
        let _ = self.opened.try_update(|tabs| {
            if let Some(tab) = tabs.iter_mut().find(|t| t.key == key) {
                tab.title = new_title.to_string();
            }
        });
    }

    pub fn close_tab(&self, key: &str) {
        leptos::logging::log!("close_tab: key='{}'", key);
        let closed_index = self
            .opened
            .with_untracked(|tabs| tabs.iter().position(|t| t.key == key));
        let Some(index) = closed_index else {
            return;
        };

        self.opened.update(|tabs| {
            tabs.remove(index);
        });

        if self
            .active
            .with_untracked(|active| active.as_deref() == Some(key))
        {
            let next_active = self
                .opened
                .with_untracked(|tabs| neighbour_after_close(tabs, index));
            self.active.set(next_active);
        }
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tab {
    pub key: String,
    pub title: String,
}

/// После закрытия активной вкладки активной становится та, что встала
/// на её место, а если закрыта последняя - предыдущая.
fn neighbour_after_close(remaining: &[Tab], closed_index: usize) -> Option<String> {
    remaining
        .get(closed_index)
        .or_else(|| remaining.last())
        .map(|t| t.key.clone())
}

fn restored_title(key: &str) -> String {
    let label = tab_label_for_key(key);
    if label.is_empty() {
        key.to_string()
    } else {
        label.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(keys: &[&str]) -> Vec<Tab> {
        keys.iter()
            .map(|k| Tab {
                key: k.to_string(),
                title: k.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_neighbour_takes_the_closed_position() {
        // были a, b, c; закрыта b
        let remaining = tabs(&["a", "c"]);
        assert_eq!(neighbour_after_close(&remaining, 1), Some("c".to_string()));
    }

    #[test]
    fn test_neighbour_falls_back_to_previous() {
        let remaining = tabs(&["a", "b"]);
        assert_eq!(neighbour_after_close(&remaining, 2), Some("b".to_string()));
    }

    #[test]
    fn test_no_neighbour_when_nothing_left() {
        assert_eq!(neighbour_after_close(&[], 0), None);
    }

    #[test]
    fn test_restored_title_uses_list_name() {
        assert_eq!(restored_title("a001_unit"), "Единицы измерения");
        assert_eq!(restored_title("unknown_key"), "unknown_key");
    }
}
