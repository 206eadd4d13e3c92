// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::*;
use std::cell::RefCell;
use zenfin::Error;
use zenfin::advice::{Advice, AdviceProvider, DEFAULT_MODEL, OpenAiAdvisor, ask, parse_advice};
use zenfin::models::{Frequency, UserRecords};
use zenfin::snapshot::{AiSnapshot, build_snapshot};

struct FakeAdvisor {
    seen: RefCell<Vec<(Vec<String>, String)>>,
    reply: Result<String, String>,
}

impl FakeAdvisor {
    fn replying(raw: &str) -> Self {
        Self {
            seen: RefCell::new(Vec::new()),
            reply: Ok(raw.to_string()),
        }
    }
}

impl AdviceProvider for FakeAdvisor {
    fn get_advice(&self, snapshot: &AiSnapshot, question: &str) -> zenfin::Result<Advice> {
        self.seen
            .borrow_mut()
            .push((snapshot.currencies.clone(), question.to_string()));
        match &self.reply {
            Ok(raw) => parse_advice(raw),
            Err(e) => Err(Error::Collaborator(e.clone())),
        }
    }
}

fn snapshot() -> AiSnapshot {
    let records = UserRecords {
        income: vec![income(1, "3000", Some("USD"), Frequency::Monthly)],
        debt: vec![debt(1, "2400", "60", Some("EUR"))],
        ..Default::default()
    };
    build_snapshot(&records, "USD", at(2025, 3, 1, 0)).unwrap()
}

#[test]
fn parses_summary_and_steps() {
    let advice =
        parse_advice(r#"{"summary":"Pay the card first.","steps":["Cut takeaway","Automate savings"]}"#)
            .unwrap();
    assert_eq!(advice.summary, "Pay the card first.");
    assert_eq!(advice.steps.len(), 2);
}

#[test]
fn empty_or_malformed_replies_are_collaborator_errors() {
    for raw in ["", "   ", "Sure! Here is some advice", r#"{"steps":[]}"#] {
        let err = parse_advice(raw).unwrap_err();
        assert!(matches!(err, Error::Collaborator(_)), "{:?}", raw);
        assert!(err.to_string().starts_with("advice unavailable"));
    }
}

#[test]
fn blank_question_never_reaches_the_provider() {
    let fake = FakeAdvisor::replying(r#"{"summary":"x","steps":[]}"#);
    let err = ask(&fake, &snapshot(), "  \n").unwrap_err();
    assert!(matches!(err, Error::Validation { field: "question", .. }));
    assert!(fake.seen.borrow().is_empty());
}

#[test]
fn provider_receives_snapshot_and_trimmed_question() {
    let fake = FakeAdvisor::replying(r#"{"summary":"ok","steps":["a","b","c"]}"#);
    let advice = ask(&fake, &snapshot(), "  How do I clear my debt?  ").unwrap();
    assert_eq!(advice.steps, vec!["a", "b", "c"]);
    let seen = fake.seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, vec!["USD", "EUR"]);
    assert_eq!(seen[0].1, "How do I clear my debt?");
}

#[test]
fn provider_failure_is_propagated_not_replaced() {
    let fake = FakeAdvisor {
        seen: RefCell::new(Vec::new()),
        reply: Err("rate limit reached".into()),
    };
    let err = ask(&fake, &snapshot(), "Should I save more?").unwrap_err();
    assert_eq!(err.to_string(), "advice unavailable: rate limit reached");
}

#[test]
fn missing_api_key_fails_before_any_request() {
    let advisor = OpenAiAdvisor::new(Some("  ".into()), DEFAULT_MODEL, "http://127.0.0.1:9/none");
    assert_eq!(advisor.model(), "gpt-4o");
    let err = advisor.get_advice(&snapshot(), "Help?").unwrap_err();
    assert!(matches!(err, Error::Collaborator(_)));
}
