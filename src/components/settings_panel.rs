use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew_tap::TapConfig;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPanelProps {
    pub config: TapConfig,
    pub on_change: Callback<TapConfig>,
    pub prevent_tap_default: bool,
    pub on_toggle_prevent: Callback<()>,
}

#[function_component]
pub fn SettingsPanel(props: &SettingsPanelProps) -> Html {
    let distance_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                cb.emit(TapConfig {
                    distance_threshold: v,
                    ..config
                });
            }
        })
    };
    let time_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            if let Ok(v) = input.value().parse::<f64>() {
                cb.emit(TapConfig {
                    time_threshold: v,
                    ..config
                });
            }
        })
    };
    let primary_cb = {
        let cb = props.on_change.clone();
        let config = props.config;
        Callback::from(move |_| {
            cb.emit(TapConfig {
                primary_button_only: !config.primary_button_only,
                ..config
            })
        })
    };
    let prevent_cb = {
        let cb = props.on_toggle_prevent.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let reset_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |_| cb.emit(TapConfig::default()))
    };

    html! {<div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; display:flex; flex-direction:column; gap:12px;">
        <h3 style="margin:0; font-size:18px;">{"Settings"}</h3>
        <label style="display:flex; align-items:center; gap:8px;">
            <span style="flex:1;">{"Distance threshold (px)"}</span>
            <input type="number" min="1" value={props.config.distance_threshold.to_string()} onchange={distance_cb} style="width:80px;" />
        </label>
        <label style="display:flex; align-items:center; gap:8px;">
            <span style="flex:1;">{"Time threshold (ms)"}</span>
            <input type="number" min="1" value={props.config.time_threshold.to_string()} onchange={time_cb} style="width:80px;" />
        </label>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={props.config.primary_button_only} onclick={primary_cb} />
            <span>{"Primary button only"}</span>
        </label>
        <label style="display:flex; align-items:center; gap:8px; cursor:pointer;">
            <input type="checkbox" checked={props.prevent_tap_default} onclick={prevent_cb} />
            <span>{"Prevent tap default (swallows the follow-up click)"}</span>
        </label>
        <button onclick={reset_cb}>{"Restore Defaults"}</button>
    </div>}
}
