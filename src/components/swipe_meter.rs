use yew::prelude::*;
use yew_overswipe::SwipeEvent;

#[derive(Properties, PartialEq, Clone)]
pub struct SwipeMeterProps {
    pub event: Option<SwipeEvent>,
    pub page: usize,
    pub page_count: usize,
}

#[function_component(SwipeMeter)]
pub fn swipe_meter(props: &SwipeMeterProps) -> Html {
    let (width, label) = match props.event {
        Some(event) => (
            event.caped_progress * 100.0,
            format!("{} {:.0}%", event.direction, event.caped_progress * 100.0),
        ),
        None => (0.0, String::new()),
    };
    html! {<div style="position:fixed; top:0; left:0; right:0; z-index:10; background:rgba(14,17,22,0.9); font-size:12px;">
        <div style={format!("height:4px; width:{width:.1}%; background:#2f81f7; transition:width 80ms linear;")}></div>
        <div style="display:flex; justify-content:space-between; padding:4px 10px;">
            <span>{ format!("{} / {}", props.page + 1, props.page_count) }</span>
            <span>{ label }</span>
        </div>
    </div>}
}
