//! Mount policy gate: whether the element belongs in the render tree at all.

use crate::model::{MountPolicy, TransitionStatus};

/// Returns whether an element in `status` should be rendered under `policy`.
///
/// Without mount flags the element is always rendered and the status only drives its classes.
/// With either flag it is left out exactly while `Unmounted`.
pub const fn should_render(status: TransitionStatus, policy: MountPolicy) -> bool {
    if !policy.is_gated() {
        return true;
    }
    !matches!(status, TransitionStatus::Unmounted)
}

/// Resting status after an exit animation completes under `policy`.
pub const fn resting_hidden_status(policy: MountPolicy) -> TransitionStatus {
    if policy.unmount_on_hide {
        TransitionStatus::Unmounted
    } else {
        TransitionStatus::Exited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TransitionStatus; 5] = [
        TransitionStatus::Unmounted,
        TransitionStatus::Exited,
        TransitionStatus::Entering,
        TransitionStatus::Entered,
        TransitionStatus::Exiting,
    ];

    #[test]
    fn ungated_policy_always_renders() {
        for status in ALL {
            assert!(should_render(status, MountPolicy::default()), "{status:?}");
        }
    }

    #[test]
    fn gated_policies_hide_only_unmounted() {
        let policies = [
            MountPolicy {
                mount_on_show: true,
                unmount_on_hide: false,
            },
            MountPolicy {
                mount_on_show: false,
                unmount_on_hide: true,
            },
            MountPolicy {
                mount_on_show: true,
                unmount_on_hide: true,
            },
        ];
        for policy in policies {
            for status in ALL {
                let expected = status != TransitionStatus::Unmounted;
                assert_eq!(should_render(status, policy), expected, "{status:?} {policy:?}");
            }
        }
    }

    #[test]
    fn unmount_on_hide_rests_unmounted() {
        let policy = MountPolicy {
            mount_on_show: false,
            unmount_on_hide: true,
        };
        assert_eq!(resting_hidden_status(policy), TransitionStatus::Unmounted);
        assert_eq!(
            resting_hidden_status(MountPolicy::default()),
            TransitionStatus::Exited
        );
    }
}
