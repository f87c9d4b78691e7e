use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PendingExpensesProps {
    /// Server-rendered list; `None` while the first load is in flight
    pub markup: Option<AttrValue>,
}

#[function_component(PendingExpenses)]
pub fn pending_expenses(props: &PendingExpensesProps) -> Html {
    html! {
        <section class="pending-expenses mt-4">
            <h4>{"Pending Expenses"}</h4>
            <div id="pending-expenses-container">
                {match props.markup.clone() {
                    Some(markup) => Html::from_html_unchecked(markup),
                    None => html! { <p class="text-muted">{"Loading..."}</p> },
                }}
            </div>
        </section>
    }
}
