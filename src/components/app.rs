use super::{page_view::PageView, swipe_meter::SwipeMeter};
use std::rc::Rc;
use yew::prelude::*;
use yew_overswipe::{Direction, EventType, Options, SwipeEvent, TouchOption, use_overswipe};

pub const PAGE_COUNT: usize = 6;

// Pager state driven by overswipe events
#[derive(Clone, Debug, PartialEq)]
pub struct PagerState {
    pub page: usize,
    pub page_count: usize,
    /// Latest progress of an unfinished swipe, shown in the meter.
    pub live: Option<SwipeEvent>,
}

pub enum PagerAction {
    Swipe(SwipeEvent),
}

impl Reducible for PagerState {
    type Action = PagerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let PagerAction::Swipe(event) = action;
        let mut next = (*self).clone();
        match event.kind {
            EventType::Progress => next.live = Some(event),
            EventType::Cancel => next.live = None,
            EventType::Swipe => {
                next.live = None;
                match event.direction {
                    Direction::Up if next.page + 1 < next.page_count => next.page += 1,
                    Direction::Down if next.page > 0 => next.page -= 1,
                    _ => {}
                }
            }
        }
        Rc::new(next)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let pager = use_reducer(|| PagerState {
        page: 0,
        page_count: PAGE_COUNT,
        live: None,
    });
    let page_ref = use_node_ref();

    let options = Options {
        touch: TouchOption::Config {
            min_speed: Some(0.3),
        },
        wheel: true,
        ..Default::default()
    };
    let on_event = {
        let pager = pager.clone();
        Callback::from(move |event: SwipeEvent| pager.dispatch(PagerAction::Swipe(event)))
    };
    use_overswipe(page_ref.clone(), options, on_event);

    // New page starts at its top edge
    {
        use_effect_with(pager.page, move |_| {
            if let Some(win) = web_sys::window() {
                win.scroll_to_with_x_and_y(0.0, 0.0);
            }
            || ()
        });
    }

    html! {
        <div style="min-height:100vh; background:#0e1116; color:#e6edf3; font-family:sans-serif;">
            <SwipeMeter event={pager.live} page={pager.page} page_count={pager.page_count} />
            <PageView node_ref={page_ref} page={pager.page} />
        </div>
    }
}
