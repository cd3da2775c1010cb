//! `c`/`s` (continue/step) and `vCont`.
//!
//! Unlike every other command, a successful continue/step produces no
//! immediate reply: the stub's next outgoing packet is the stop reply that
//! arrives once the (externally driven) fault interceptor observes the next
//! trap and calls back in. A *failed* delegate call still replies `E01`
//! immediately, since the target never actually resumed.

use crate::delegate::Delegate;
use crate::session::{SessionState, StopReason, WakeTarget};

use super::DispatchOutcome;

/// `c`: continue.
///
/// Per the resume discipline invariant, [`SessionState::wake`] is called
/// exactly once regardless of whether the delegate call below succeeds.
pub fn cont<'a, D: Delegate, W: WakeTarget>(
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> DispatchOutcome<'a> {
    let result = if session.step_mode && session.stop_reason != StopReason::Step {
        // Thread was left single-step-armed by an earlier `s`, but the
        // intervening stop was not itself a step trap; nothing to undo.
        Ok(())
    } else {
        delegate.resume(session.current_thread_tcb)
    };
    session.step_mode = false;
    session.wake();

    match result {
        Ok(()) => DispatchOutcome::NoReply,
        Err(_) => {
            log::error!("'c': delegate resume failed");
            DispatchOutcome::reply(b"E01")
        }
    }
}

/// `s`: single-step.
pub fn step<'a, D: Delegate, W: WakeTarget>(
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> DispatchOutcome<'a> {
    let result = if !session.step_mode && session.stop_reason != StopReason::Step {
        delegate.step(session.current_thread_tcb)
    } else {
        Ok(())
    };
    session.step_mode = true;
    session.wake();

    match result {
        Ok(()) => DispatchOutcome::NoReply,
        Err(_) => {
            log::error!("'s': delegate step failed");
            DispatchOutcome::reply(b"E01")
        }
    }
}

/// `vCont[;action[:thread-id]]...`: GDB's generalized resume command.
///
/// Per-thread targeting is ignored (the stub always has exactly one
/// schedulable thread); only the first action's verb is honored.
pub fn vcont<'a, D: Delegate, W: WakeTarget>(
    body: &[u8],
    session: &mut SessionState<W>,
    delegate: &mut D,
) -> DispatchOutcome<'a> {
    let action = body
        .strip_prefix(b";")
        .and_then(|rest| rest.split(|&b| b == b';').next())
        .unwrap_or(&[]);
    let verb = action.split(|&b| b == b':').next().unwrap_or(&[]);

    match verb {
        b"c" => cont(session, delegate),
        b"s" => step(session, delegate),
        // spec.md §4.8 / the original `GDB_vcont`: any other action still
        // gets an (empty) reply, unlike a genuinely unrecognised packet.
        _ => DispatchOutcome::reply(b""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delegate::{AccessMode, BreakType, DelegateError, Tcb, UserContext};
    use crate::session::test_support::CountingWake;

    struct FakeDelegate {
        resume_calls: usize,
        step_calls: usize,
        fail: bool,
    }

    impl Delegate for FakeDelegate {
        fn read_memory(&mut self, _: u64, _: usize, _: &mut [u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_memory(&mut self, _: u64, _: &[u8]) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn read_registers(&mut self, _: Tcb) -> Result<UserContext, DelegateError> {
            unimplemented!()
        }
        fn read_register(&mut self, _: Tcb, _: usize) -> Result<u64, DelegateError> {
            unimplemented!()
        }
        fn write_registers(&mut self, _: Tcb, _: &UserContext, _: usize) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn write_register(&mut self, _: Tcb, _: usize, _: u64) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn insert_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn remove_break(&mut self, _: Tcb, _: BreakType, _: u64, _: u64, _: AccessMode) -> Result<(), DelegateError> {
            unimplemented!()
        }
        fn resume(&mut self, _: Tcb) -> Result<(), DelegateError> {
            self.resume_calls += 1;
            if self.fail {
                Err(DelegateError)
            } else {
                Ok(())
            }
        }
        fn step(&mut self, _: Tcb) -> Result<(), DelegateError> {
            self.step_calls += 1;
            if self.fail {
                Err(DelegateError)
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn continue_wakes_and_replies_nothing_on_success() {
        let mut d = FakeDelegate {
            resume_calls: 0,
            step_calls: 0,
            fail: false,
        };
        let mut session = SessionState::new(Tcb(1), CountingWake::default());
        let r = cont(&mut session, &mut d);
        match r {
            DispatchOutcome::NoReply => {}
            DispatchOutcome::Reply(_) => panic!("expected no immediate reply"),
        }
        assert_eq!(d.resume_calls, 1);
    }

    #[test]
    fn continue_failure_still_wakes_but_replies_e01() {
        let mut d = FakeDelegate {
            resume_calls: 0,
            step_calls: 0,
            fail: true,
        };
        let mut session = SessionState::new(Tcb(1), CountingWake::default());
        let r = cont(&mut session, &mut d);
        match r {
            DispatchOutcome::Reply(b) => assert_eq!(b, b"E01"),
            DispatchOutcome::NoReply => panic!("expected E01"),
        }
    }

    #[test]
    fn step_sets_step_mode() {
        let mut d = FakeDelegate {
            resume_calls: 0,
            step_calls: 0,
            fail: false,
        };
        let mut session = SessionState::new(Tcb(1), CountingWake::default());
        assert!(!session.step_mode);
        let _ = step(&mut session, &mut d);
        assert!(session.step_mode);
        assert_eq!(d.step_calls, 1);
    }

    #[test]
    fn vcont_routes_continue_and_step() {
        let mut d = FakeDelegate {
            resume_calls: 0,
            step_calls: 0,
            fail: false,
        };
        let mut session = SessionState::new(Tcb(1), CountingWake::default());
        let _ = vcont(b";c", &mut session, &mut d);
        assert_eq!(d.resume_calls, 1);
        let _ = vcont(b";s:01", &mut session, &mut d);
        assert_eq!(d.step_calls, 1);
    }

    #[test]
    fn vcont_unknown_action_replies_empty() {
        let mut d = FakeDelegate {
            resume_calls: 0,
            step_calls: 0,
            fail: false,
        };
        let mut session = SessionState::new(Tcb(1), CountingWake::default());
        let r = vcont(b";t", &mut session, &mut d);
        match r {
            DispatchOutcome::Reply(b) => assert_eq!(b, b""),
            DispatchOutcome::NoReply => panic!("expected an empty reply, not silence"),
        }
    }
}
