use super::catalog::LineCatalog;
use super::state::LineRowsState;
use super::unit_selector::UnitSelectorState;
use crate::domain::a004_unit_conversion::ui::material_units::open_add_unit_dialog;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

/// Таблица строк документа с итогом.
///
/// Суммы строк и итог считаются из текущего ввода при каждом рендере.
#[component]
pub fn DocumentLinesEditor(
    rows: RwSignal<LineRowsState>,
    catalog: LineCatalog,
    #[prop(into)] read_only: Signal<bool>,
) -> impl IntoView {
    // наборы единиц для всех выбранных материалов
    Effect::new(move |_| {
        for material_id in rows.with(|s| s.material_ids()) {
            catalog.ensure_unit_set(&material_id);
        }
    });

    let row_keys = move || rows.with(|s| s.rows().iter().map(|r| r.key).collect::<Vec<_>>());
    let total = move || format_money(rows.with(|s| s.total()));

    view! {
        <div class="document-lines">
            <div class="document-lines__toolbar">
                <Button
                    appearance=ButtonAppearance::Secondary
                    size=ButtonSize::Small
                    on_click=move |_| {
                        rows.update(|s| {
                            s.add_row();
                        });
                    }
                    disabled=read_only
                >
                    {icon("plus")}
                    " Добавить строку"
                </Button>
            </div>

            <table class="table__data table--striped document-lines__table">
                <thead class="table__head">
                    <tr>
                        <th class="table__header-cell" style="width: 40px;">"№"</th>
                        <th class="table__header-cell">"Материал"</th>
                        <th class="table__header-cell" style="width: 200px;">"Ед. изм."</th>
                        <th class="table__header-cell" style="width: 110px;">"Количество"</th>
                        <th class="table__header-cell" style="width: 120px;">"Цена"</th>
                        <th class="table__header-cell" style="width: 130px; text-align: right;">"Сумма"</th>
                        <th class="table__header-cell">"Примечание"</th>
                        <th class="table__header-cell" style="width: 40px;"></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=row_keys
                        key=|k| *k
                        children=move |key| view! {
                            <LineRowView key=key rows=rows catalog=catalog read_only=read_only />
                        }
                    />
                    <Show when=move || rows.with(|s| s.is_empty())>
                        <tr>
                            <td class="table__cell document-lines__empty" colspan="8">
                                "Строк нет. Документ без строк сохранить нельзя."
                            </td>
                        </tr>
                    </Show>
                </tbody>
                <tfoot>
                    <tr class="document-lines__total">
                        <td class="table__cell" colspan="5" style="text-align: right; font-weight: 600;">"Итого:"</td>
                        <td class="table__cell" style="text-align: right; font-weight: 600; font-variant-numeric: tabular-nums;">
                            {total}
                        </td>
                        <td class="table__cell" colspan="2"></td>
                    </tr>
                </tfoot>
            </table>
        </div>
    }
}

#[component]
fn LineRowView(
    key: u64,
    rows: RwSignal<LineRowsState>,
    catalog: LineCatalog,
    read_only: Signal<bool>,
) -> impl IntoView {
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let field = move |f: fn(&super::state::LineRow) -> String| {
        move || rows.with(|s| s.row(key).map(f).unwrap_or_default())
    };
    let material_id = field(|r| r.material_id.clone());
    let unit_id = field(|r| r.unit_id.clone());

    let line_no = move || {
        rows.with(|s| s.rows().iter().position(|r| r.key == key))
            .map(|i| i + 1)
            .unwrap_or(0)
    };
    let amount = move || {
        rows.with(|s| s.row(key).map(|r| r.amount()).unwrap_or(0.0))
    };

    let on_material_change = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        rows.update(|s| s.set_material(key, &value));
        catalog.ensure_unit_set(&value);
    };

    let configure_units = move |material_id: String| {
        let Some(set) = catalog.unit_set(&material_id) else {
            return;
        };
        let units = catalog.units.get_untracked();
        open_add_unit_dialog(
            modal_stack,
            set,
            units,
            true,
            Callback::new(move |_| catalog.reload_unit_set(&material_id)),
        );
    };

    view! {
        <tr class="table__row">
            <td class="table__cell">{line_no}</td>
            <td class="table__cell">
                <select
                    class="form__select"
                    prop:disabled=move || read_only.get()
                    on:change=on_material_change
                >
                    <option value="" selected=move || material_id().is_empty()>"— выберите материал —"</option>
                    {move || {
                        let current = material_id();
                        catalog.materials.get().into_iter().map(|m| {
                            let id = m.to_string_id();
                            let selected = id == current;
                            let label = if m.is_active() {
                                m.display_label()
                            } else {
                                format!("{} (не активен)", m.display_label())
                            };
                            view! { <option value=id selected=selected>{label}</option> }
                        }).collect_view()
                    }}
                </select>
            </td>
            <td class="table__cell">
                {move || match catalog.selector_state(&material_id()) {
                    UnitSelectorState::NoMaterial => view! {
                        <select class="form__select" disabled=true>
                            <option>"—"</option>
                        </select>
                    }.into_any(),
                    UnitSelectorState::Loading => view! {
                        <Spinner size=SpinnerSize::Tiny />
                    }.into_any(),
                    UnitSelectorState::LoadFailed { material_id } => view! {
                        <Button
                            appearance=ButtonAppearance::Transparent
                            size=ButtonSize::Small
                            on_click=move |_| catalog.reload_unit_set(&material_id)
                            attr:title="Единицы материала не загрузились"
                        >
                            {icon("refresh")}
                            " Повторить"
                        </Button>
                    }.into_any(),
                    UnitSelectorState::NeedsConfiguration { material_id } => view! {
                        <Button
                            appearance=ButtonAppearance::Transparent
                            size=ButtonSize::Small
                            on_click=move |_| configure_units(material_id.clone())
                            disabled=read_only
                        >
                            {icon("plus")}
                            " Добавить единицу"
                        </Button>
                    }.into_any(),
                    UnitSelectorState::Ready { options } => {
                        let current = unit_id();
                        view! {
                            <select
                                class="form__select"
                                prop:disabled=move || read_only.get()
                                on:change=move |ev| {
                                    let value = event_target_value(&ev);
                                    rows.update(|s| s.set_unit(key, &value));
                                }
                            >
                                <option value="" selected=current.is_empty()>"—"</option>
                                {options.into_iter().map(|o| {
                                    let selected = o.unit_id == current;
                                    view! { <option value=o.unit_id selected=selected>{o.label}</option> }
                                }).collect_view()}
                            </select>
                        }.into_any()
                    }
                }}
            </td>
            <td class="table__cell">
                <input
                    type="text"
                    inputmode="decimal"
                    class="form__input form__input--number"
                    prop:value=field(|r| r.quantity_text.clone())
                    prop:disabled=move || read_only.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        rows.update(|s| s.set_quantity_text(key, &value));
                    }
                />
            </td>
            <td class="table__cell">
                <input
                    type="text"
                    inputmode="decimal"
                    class="form__input form__input--number"
                    prop:value=field(|r| r.price_text.clone())
                    prop:disabled=move || read_only.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        rows.update(|s| s.set_price_text(key, &value));
                    }
                />
            </td>
            <td class="table__cell" style="text-align: right; font-variant-numeric: tabular-nums;">
                {move || format_money(amount())}
            </td>
            <td class="table__cell">
                <input
                    type="text"
                    class="form__input"
                    prop:value=field(|r| r.note.clone())
                    prop:disabled=move || read_only.get()
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        rows.update(|s| s.set_note(key, &value));
                    }
                />
            </td>
            <td class="table__cell">
                <Show when=move || !read_only.get()>
                    <button
                        class="button button--icon"
                        title="Удалить строку"
                        on:click=move |_| rows.update(|s| s.remove_row(key))
                    >
                        {icon("trash")}
                    </button>
                </Show>
            </td>
        </tr>
    }
}
