use shared::{Category, LineItemField, LineItemRow};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LineItemRowProps {
    pub row: LineItemRow,
    pub on_change: Callback<(u32, LineItemField, String)>,
    pub on_remove: Callback<u32>,
}

#[function_component(ExpenseLineItemRow)]
pub fn expense_line_item_row(props: &LineItemRowProps) -> Html {
    let index = props.row.index;

    let on_input = |field: LineItemField| {
        let on_change = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_change.emit((index, field, input.value()));
        })
    };

    let on_category_change = {
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_change.emit((index, LineItemField::Category, select.value()));
        })
    };

    let on_remove = {
        let on_remove = props.on_remove.clone();
        Callback::from(move |_: MouseEvent| on_remove.emit(index))
    };

    let selected = props.row.category;

    html! {
        <div class="line-item row mb-3" data-index={index.to_string()}>
            <div class="col-md-3">
                <div class="form-group">
                    <label>{"Item Name"}</label>
                    <input
                        type="text"
                        class="form-control"
                        name={props.row.field_name(LineItemField::ItemName)}
                        value={props.row.item_name.clone()}
                        oninput={on_input(LineItemField::ItemName)}
                        required=true
                    />
                </div>
            </div>
            <div class="col-md-2">
                <div class="form-group">
                    <label>{"Category"}</label>
                    <select
                        class="form-control"
                        name={props.row.field_name(LineItemField::Category)}
                        onchange={on_category_change}
                        required=true
                    >
                        <option value="" selected={selected.is_none()}>{"Select Category"}</option>
                        {for Category::ALL.iter().map(|category| html! {
                            <option value={category.as_str()} selected={selected == Some(*category)}>
                                {category.label()}
                            </option>
                        })}
                    </select>
                </div>
            </div>
            <div class="col-md-2">
                <div class="form-group">
                    <label>{"Quantity"}</label>
                    <input
                        type="number"
                        class="form-control amount-input"
                        name={props.row.field_name(LineItemField::Quantity)}
                        value={props.row.quantity.raw.clone()}
                        oninput={on_input(LineItemField::Quantity)}
                        required=true
                    />
                </div>
            </div>
            <div class="col-md-2">
                <div class="form-group">
                    <label>{"Price"}</label>
                    <input
                        type="number"
                        class="form-control price-input"
                        name={props.row.field_name(LineItemField::Price)}
                        value={props.row.price.raw.clone()}
                        oninput={on_input(LineItemField::Price)}
                        required=true
                    />
                </div>
            </div>
            <div class="col-md-2">
                <div class="form-group">
                    <label>{"Amount"}</label>
                    <input
                        type="number"
                        class="form-control total-input"
                        name={props.row.field_name(LineItemField::Amount)}
                        value={props.row.amount().to_string()}
                        readonly=true
                    />
                </div>
            </div>
            <div class="col-md-1 d-flex align-items-end">
                <button type="button" class="btn btn-danger remove-item" onclick={on_remove}>
                    {"Remove"}
                </button>
            </div>
        </div>
    }
}
