//! Transition showcase app.
//!
//! Renders a handful of `system_ui` transitions side by side, one per animation family, plus a
//! keyed group, so the shell's animation CSS can be reviewed against the live status contract.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use system_ui::{
    Transition, TransitionConfig, TransitionDuration, TransitionGroup, TransitionSettings,
    TransitionStatus, DEFAULT_DURATION_MS,
};

const EVENT_LOG_LIMIT: usize = 12;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ShowcaseState {
    visible: bool,
    items: Vec<String>,
    next_item: u32,
    hero: TransitionSettings,
}

impl Default for ShowcaseState {
    fn default() -> Self {
        Self {
            visible: true,
            items: vec!["item-1".to_string(), "item-2".to_string()],
            next_item: 3,
            hero: TransitionSettings::default(),
        }
    }
}

impl ShowcaseState {
    fn restore(raw: Option<Value>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_value(raw) {
            Ok(state) => state,
            Err(err) => {
                logging::warn!("transition showcase restore failed: {err}");
                Self::default()
            }
        }
    }

    fn hero_config(&self) -> TransitionConfig {
        match TransitionConfig::try_from(self.hero.clone()) {
            Ok(config) => config,
            Err(err) => {
                logging::warn!("transition showcase hero settings rejected: {err}");
                TransitionConfig::default()
            }
        }
    }

    fn push_item(&mut self) {
        self.items.push(format!("item-{}", self.next_item));
        self.next_item += 1;
    }

    fn pop_item(&mut self) {
        if !self.items.is_empty() {
            self.items.remove(0);
        }
    }
}

fn push_event(log: RwSignal<Vec<String>>, label: &str, status: TransitionStatus) {
    log.update(|entries| {
        entries.push(format!("{label}: {}", status.as_str()));
        if entries.len() > EVENT_LOG_LIMIT {
            let overflow = entries.len() - EVENT_LOG_LIMIT;
            entries.drain(..overflow);
        }
    });
}

#[component]
/// Transition showcase window contents.
pub fn TransitionShowcaseApp(
    /// Previously persisted showcase state, including optional hero transition settings.
    #[prop(optional)]
    restored_state: Option<Value>,
) -> impl IntoView {
    let initial = ShowcaseState::restore(restored_state);
    let hero = initial.hero_config();
    let state = create_rw_signal(initial);
    let event_log = create_rw_signal(Vec::<String>::new());

    let visible = Signal::derive(move || state.with(|current| current.visible));
    let keys = Signal::derive(move || state.with(|current| current.items.clone()));
    let record = |label: &'static str| {
        Callback::new(move |status: TransitionStatus| push_event(event_log, label, status))
    };

    view! {
        <div class="transition-showcase">
            <div class="transition-showcase-controls">
                <button on:click=move |_| state.update(|current| current.visible = !current.visible)>
                    {move || if visible.get() { "Hide" } else { "Show" }}
                </button>
                <button on:click=move |_| state.update(ShowcaseState::push_item)>"Add item"</button>
                <button on:click=move |_| state.update(ShowcaseState::pop_item)>"Remove first"</button>
            </div>

            <div class="transition-showcase-cards">
                <Transition
                    visible=visible
                    animation=hero.animation
                    directional=hero.directional
                    duration=hero.duration.unwrap_or(TransitionDuration::Uniform(DEFAULT_DURATION_MS))
                    transition_on_mount=true
                    on_start=record("start")
                    on_complete=record("complete")
                    on_show=record("show")
                    on_hide=record("hide")
                >
                    <p>"Hero"</p>
                </Transition>
                <Transition visible=visible animation="slide down" duration=300u32 mount_on_show=true>
                    <p>"Slide down, mounted on show"</p>
                </Transition>
                <Transition visible=visible animation="scale" unmount_on_hide=true>
                    <p>"Scale, unmounted on hide"</p>
                </Transition>
                <Transition
                    visible=visible
                    animation="pulse"
                    duration=TransitionDuration::Split { show: 200, hide: 800 }
                >
                    <p>"Pulse, static keyframes"</p>
                </Transition>
            </div>

            <TransitionGroup
                layout_class="transition-showcase-list"
                keys=keys
                animation="fly left"
                duration=250u32
                render=Callback::new(|key: String| view! { <span>{key}</span> }.into_view())
            />

            <ul class="transition-showcase-log">
                <For
                    each=move || event_log.get().into_iter().enumerate()
                    key=|(index, entry)| (*index, entry.clone())
                    children=|(_, entry)| view! { <li>{entry}</li> }
                />
            </ul>
        </div>
    }
}
