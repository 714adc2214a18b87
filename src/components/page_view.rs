use yew::prelude::*;

const PARAGRAPHS: usize = 14;

#[derive(Properties, PartialEq, Clone)]
pub struct PageViewProps {
    pub node_ref: NodeRef,
    pub page: usize,
}

#[function_component(PageView)]
pub fn page_view(props: &PageViewProps) -> Html {
    let hue = (props.page * 57) % 360;
    html! {
        <article ref={props.node_ref.clone()} style={format!("margin:0 auto; max-width:640px; padding:48px 24px 96px; border-left:4px solid hsl({hue},60%,55%);")}>
            <h1 style="margin-top:0;">{ format!("Page {}", props.page + 1) }</h1>
            { for (0..PARAGRAPHS).map(|i| html! {
                <p key={i} style="line-height:1.6; opacity:0.85;">
                    { format!("Section {}.{}: keep scrolling. Past the bottom edge, a long pull up turns the page; past the top edge, a pull down goes back.", props.page + 1, i + 1) }
                </p>
            }) }
        </article>
    }
}
