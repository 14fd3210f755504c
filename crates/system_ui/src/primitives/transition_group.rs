use std::{cell::RefCell, rc::Rc};

use leptos::*;
use transition_runtime::{
    AnimationName, TransitionDuration, TransitionGroup as KeyedTransitions, TransitionStatus,
};

use super::{config_from_props, publish_if_changed};
use crate::timeout::TimeoutScheduler;

type Group = KeyedTransitions<String, TimeoutScheduler>;
type GroupSlot = Rc<RefCell<Option<Group>>>;

#[derive(Debug, Clone, PartialEq, Eq)]
struct GroupItem {
    key: String,
    status: TransitionStatus,
    class_list: String,
}

fn capture(group: &Group) -> Vec<GroupItem> {
    group
        .iter()
        .map(|(key, machine)| GroupItem {
            key: key.clone(),
            status: machine.status(),
            class_list: machine.class_list(),
        })
        .collect()
}

fn with_group(slot: &GroupSlot, items: RwSignal<Vec<GroupItem>>, op: impl FnOnce(&mut Group)) {
    let snapshot = {
        let Ok(mut guard) = slot.try_borrow_mut() else {
            logging::warn!("transition group re-entered while busy");
            return;
        };
        let Some(group) = guard.as_mut() else {
            return;
        };
        op(group);
        capture(group)
    };
    publish_if_changed(items, snapshot);
}

#[component]
/// Renders one transition per key: new keys animate in, removed keys animate out and leave the
/// DOM once their exit completes.
pub fn TransitionGroup(
    /// Layout-only class hook for app-specific placement.
    #[prop(optional)]
    layout_class: Option<&'static str>,
    /// Keys of the children to show, in render order.
    #[prop(into)]
    keys: MaybeSignal<Vec<String>>,
    /// Named animation, or an enter/exit pair. Defaults to `fade`.
    #[prop(optional, into)]
    animation: Option<AnimationName>,
    /// Whether the animation has distinct `-in`/`-out` keyframes. Defaults to the catalog entry.
    #[prop(optional)]
    directional: Option<bool>,
    /// Duration in milliseconds, or a show/hide pair. Defaults to 500ms.
    #[prop(optional, into)]
    duration: Option<TransitionDuration>,
    /// Renders the content for one key.
    render: Callback<String, View>,
) -> impl IntoView {
    let config = config_from_props(animation, directional, duration);
    let slot: GroupSlot = Rc::new(RefCell::new(None));
    let items = create_rw_signal(Vec::<GroupItem>::new());

    let spawn = {
        let weak = Rc::downgrade(&slot);
        move |key: &String| {
            let weak = weak.clone();
            let key = key.clone();
            let scheduler = TimeoutScheduler::new(move |handle| {
                let Some(slot) = weak.upgrade() else {
                    return;
                };
                with_group(&slot, items, |group| {
                    group.timer_fired(&key, handle);
                });
            });
            (scheduler, ())
        }
    };
    let group = KeyedTransitions::new(config, &keys.get_untracked(), spawn);
    let initial = capture(&group);
    *slot.borrow_mut() = Some(group);
    items.set(initial);

    {
        let slot = Rc::clone(&slot);
        create_effect(move |previous: Option<()>| {
            let next = keys.get();
            if previous.is_some() {
                with_group(&slot, items, |group| group.sync(&next));
            }
        });
    }

    on_cleanup(move || {
        let disposed = slot.try_borrow_mut().ok().and_then(|mut guard| guard.take());
        drop(disposed);
    });

    let class = merge_group_class(layout_class);
    view! {
        <div class=class data-ui-primitive="true" data-ui-kind="transition-group">
            <For
                each=move || items.get()
                key=|item| item.key.clone()
                children=move |item| {
                    let key = item.key.clone();
                    let lookup = move |read: fn(&GroupItem) -> String| {
                        items.with(|list| {
                            list.iter().find(|entry| entry.key == key).map(read).unwrap_or_default()
                        })
                    };
                    let class_lookup = lookup.clone();
                    view! {
                        <div
                            class=move || class_lookup(|entry| entry.class_list.clone())
                            data-ui-primitive="true"
                            data-ui-kind="transition"
                            data-ui-state=move || lookup(|entry| entry.status.as_str().to_string())
                        >
                            {render.call(item.key)}
                        </div>
                    }
                }
            />
        </div>
    }
}

fn merge_group_class(layout_class: Option<&'static str>) -> String {
    super::merge_layout_class("ui-transition-group".to_string(), layout_class)
}
