use super::super::view_model::MaterialDetailsVm;
use crate::shared::reference::ReferenceSelect;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn GeneralTab(vm: MaterialDetailsVm) -> impl IntoView {
    view! {
        <div class="details-section">
            <h4 class="details-section__title">"Основные поля"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Код *"</label>
                    <Input value=vm.code />
                </div>
                <div class="form__group" style="grid-column: span 2;">
                    <label class="form__label">"Наименование *"</label>
                    <Input value=vm.name placeholder="Введите наименование" />
                </div>

                <div class="form__group">
                    <label class="form__label">"Категория *"</label>
                    <ReferenceSelect items=vm.categories value=vm.category_id />
                </div>
                <div class="form__group">
                    <label class="form__label">"Единица учёта *"</label>
                    <ReferenceSelect items=vm.units value=vm.unit_id />
                </div>
                <div class="form__group">
                    <label class="form__label">"Цена за единицу"</label>
                    <Input value=vm.unit_price attr:inputmode="decimal" />
                </div>
            </div>
        </div>

        <div class="details-section">
            <h4 class="details-section__title">"Запас"</h4>
            <div class="details-grid--3col">
                <div class="form__group">
                    <label class="form__label">"Минимальный"</label>
                    <Input value=vm.min_stock_level placeholder="Опционально" attr:inputmode="decimal" />
                </div>
                <div class="form__group">
                    <label class="form__label">"Максимальный"</label>
                    <Input value=vm.max_stock_level placeholder="Опционально" attr:inputmode="decimal" />
                </div>
                <div class="form__group" style="grid-column: 1 / -1;">
                    <label class="form__label">"Комментарий"</label>
                    <Textarea value=vm.comment placeholder="Опционально" attr:rows=3 />
                </div>
            </div>
        </div>
    }
}
