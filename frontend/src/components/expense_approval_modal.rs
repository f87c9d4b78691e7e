use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ExpenseApprovalModalProps {
    /// Approval fragment; expected to contain `#expenseApprovalModal`
    pub markup: AttrValue,
}

#[function_component(ExpenseApprovalModal)]
pub fn expense_approval_modal(props: &ExpenseApprovalModalProps) -> Html {
    html! {
        <div id="expenseApprovalModalContainer">
            {if props.markup.is_empty() {
                html! {}
            } else {
                Html::from_html_unchecked(props.markup.clone())
            }}
        </div>
    }
}
