use yew::prelude::*;
use yew_tap::config::STORAGE_KEY;
use yew_tap::{TapBinding, TapConfig};

use super::{settings_panel::SettingsPanel, tap_pad::TapPad};

#[function_component(App)]
pub fn app() -> Html {
    let config = use_state(|| TapConfig::load_from_storage(STORAGE_KEY));
    let prevent_tap_default = use_state(|| true);
    let binding = use_mut_ref(|| None::<TapBinding>);

    // Install on body once; detach on unmount
    {
        let binding = binding.clone();
        let initial = *config;
        use_effect_with((), move |_| {
            match TapBinding::install_on_body(initial) {
                Ok(b) => *binding.borrow_mut() = Some(b),
                Err(err) => log::error!("tap binding unavailable: {err}"),
            }
            move || {
                if let Some(b) = binding.borrow_mut().take() {
                    b.disable();
                }
            }
        });
    }
    // Persist config & push into the live binding
    {
        let binding = binding.clone();
        use_effect_with(*config, move |cfg| {
            cfg.save_to_storage(STORAGE_KEY);
            if let Some(b) = &*binding.borrow() {
                if let Err(err) = b.set_config(*cfg) {
                    log::warn!("rejected tap config: {err}");
                }
            }
            || ()
        });
    }

    let on_change = {
        let config = config.clone();
        Callback::from(move |next: TapConfig| {
            if next.validate().is_ok() {
                config.set(next);
            }
        })
    };
    let on_toggle_prevent = {
        let prevent_tap_default = prevent_tap_default.clone();
        Callback::from(move |_| prevent_tap_default.set(!*prevent_tap_default))
    };

    html! {
        <div id="root" style="display:flex; gap:24px; padding:24px; align-items:flex-start; flex-wrap:wrap;">
            <TapPad prevent_tap_default={*prevent_tap_default} />
            <SettingsPanel
                config={*config}
                {on_change}
                prevent_tap_default={*prevent_tap_default}
                {on_toggle_prevent}
            />
        </div>
    }
}
