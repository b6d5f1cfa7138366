use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CustomEvent, HtmlElement};
use yew::prelude::*;
use yew_tap::TAP_EVENT;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PadStats {
    pub taps: u32,
    pub clicks: u32,
    pub last_tap: Option<(f64, f64)>,
}

pub enum PadAction {
    Tap { x: f64, y: f64 },
    Click,
}

impl Reducible for PadStats {
    type Action = PadAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            PadAction::Tap { x, y } => {
                next.taps += 1;
                next.last_tap = Some((x, y));
            }
            PadAction::Click => next.clicks += 1,
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TapPadProps {
    pub prevent_tap_default: bool,
}

fn detail_number(detail: &JsValue, key: &str) -> f64 {
    Reflect::get(detail, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

#[function_component(TapPad)]
pub fn tap_pad(props: &TapPadProps) -> Html {
    let pad_ref = use_node_ref();
    let stats = use_reducer(PadStats::default);

    {
        let pad_ref = pad_ref.clone();
        let stats = stats.clone();
        use_effect_with(props.prevent_tap_default, move |prevent| {
            let prevent = *prevent;
            let pad = pad_ref.cast::<HtmlElement>();
            let tap_cb = Closure::wrap(Box::new(move |e: CustomEvent| {
                if prevent {
                    e.prevent_default();
                }
                let detail = e.detail();
                stats.dispatch(PadAction::Tap {
                    x: detail_number(&detail, "pageX"),
                    y: detail_number(&detail, "pageY"),
                });
            }) as Box<dyn FnMut(_)>);
            if let Some(pad) = &pad {
                if let Err(err) =
                    pad.add_event_listener_with_callback(TAP_EVENT, tap_cb.as_ref().unchecked_ref())
                {
                    log::warn!("tap pad listener failed: {:?}", err);
                }
            }
            move || {
                if let Some(pad) = pad {
                    let _ = pad
                        .remove_event_listener_with_callback(TAP_EVENT, tap_cb.as_ref().unchecked_ref());
                }
            }
        });
    }

    let onclick = {
        let stats = stats.clone();
        Callback::from(move |_: MouseEvent| stats.dispatch(PadAction::Click))
    };
    let last = match stats.last_tap {
        Some((x, y)) => format!("{x:.0}, {y:.0}"),
        None => "-".to_string(),
    };

    html! {
        <div ref={pad_ref} {onclick} style="width:320px; height:220px; border-radius:12px; background:#21262d; border:1px dashed #30363d; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:6px; user-select:none; touch-action:manipulation;">
            <span style="font-size:18px; font-weight:600;">{"Tap here"}</span>
            <span>{ format!("taps: {}", stats.taps) }</span>
            <span>{ format!("native clicks: {}", stats.clicks) }</span>
            <span style="opacity:0.7;">{ format!("last tap: {}", last) }</span>
        </div>
    }
}
