use serde_json::json;
use signature::{CrashInfo, CrashSignature};

fn crash(raw_stdout: &[&str], raw_stderr: &[&str], backtrace: &[&str]) -> CrashInfo {
    let mut c = CrashInfo::new();
    c.raw_stdout = raw_stdout.iter().map(|s| s.to_string()).collect();
    c.raw_stderr = raw_stderr.iter().map(|s| s.to_string()).collect();
    c.backtrace = backtrace.iter().map(|s| s.to_string()).collect();
    c
}

#[test]
fn scenario_output_on_stderr() {
    let sig = CrashSignature::parse(&json!({
        "symptoms": [{"type": "output", "src": "stderr", "value": "Assertion failure"}]
    }))
    .unwrap();

    assert!(sig.matches(&crash(&[], &["foo", "Assertion failure: bar"], &[])));
    assert!(!sig.matches(&crash(&[], &["foo"], &[])));
}

#[test]
fn scenario_stack_frame_default_frame_number() {
    let sig = CrashSignature::parse(&json!({
        "symptoms": [{"type": "stackFrame", "functionName": "abort"}]
    }))
    .unwrap();

    assert!(sig.matches(&crash(&[], &[], &["abort", "main"])));
    assert!(!sig.matches(&crash(&[], &[], &["main", "abort"])));
}

#[test]
fn scenario_stack_frames_exact_and_wildcard() {
    let sig = CrashSignature::parse(&json!({
        "symptoms": [{
            "type": "stackFrames",
            "functionNames": ["JS_Assert", "???", "main"]
        }]
    }))
    .unwrap();

    assert!(sig.matches(&crash(&[], &[], &["JS_Assert", "foo", "bar", "main"])));
    assert!(!sig.matches(&crash(&[], &[], &["foo", "JS_Assert", "main"])));
}

#[test]
fn scenario_crash_address_range_and_absence() {
    let sig = CrashSignature::parse(&json!({
        "symptoms": [{"type": "crashAddress", "address": "4096..8192"}]
    }))
    .unwrap();

    let mut c = crash(&[], &[], &[]);
    c.crash_address = Some(5000);
    assert!(sig.matches(&c));

    c.crash_address = None;
    assert!(!sig.matches(&c));
}

#[test]
fn diff_examples_four_five_six() {
    let sig_insert = CrashSignature::parse(&json!({
        "symptoms": [{"type": "stackFrames", "functionNames": ["A", "C"]}]
    }))
    .unwrap();
    let fitted = sig_insert.fit(&crash(&[], &[], &["A", "B", "C"]));
    assert_eq!(fitted.to_json()["symptoms"][0]["functionNames"], json!(["A", "?", "C"]));
    assert_eq!(sig_insert.get_distance(&crash(&[], &[], &["A", "B", "C"])), 1);

    let sig_replace = CrashSignature::parse(&json!({
        "symptoms": [{"type": "stackFrames", "functionNames": ["A", "Z", "C"]}]
    }))
    .unwrap();
    let fitted = sig_replace.fit(&crash(&[], &[], &["A", "B", "C"]));
    assert_eq!(fitted.to_json()["symptoms"][0]["functionNames"], json!(["A", "?", "C"]));

    let sig_ungeneralizable = CrashSignature::parse(&json!({
        "symptoms": [{"type": "stackFrames", "functionNames": ["A", "X"]}]
    }))
    .unwrap();
    let fitted = sig_ungeneralizable.fit(&crash(&[], &[], &["A"]));
    assert_eq!(
        fitted.to_json()["symptoms"][0]["functionNames"],
        json!(["A", "X"]),
        "no generalization exists within maxDepth, fit leaves the symptom untouched"
    );
}

#[test]
fn conjunction_property() {
    let doc = json!({
        "symptoms": [
            {"type": "output", "value": "SEGV"},
            {"type": "stackSize", "size": ">= 2"}
        ]
    });
    let sig = CrashSignature::parse(&doc).unwrap();
    let s1_only = CrashSignature::parse(&json!({"symptoms": [doc["symptoms"][0].clone()]})).unwrap();
    let s2_only = CrashSignature::parse(&json!({"symptoms": [doc["symptoms"][1].clone()]})).unwrap();

    for c in [
        crash(&[], &["SEGV"], &["a", "b"]),
        crash(&[], &["SEGV"], &["a"]),
        crash(&[], &["other"], &["a", "b"]),
        crash(&[], &["other"], &["a"]),
    ] {
        assert_eq!(sig.matches(&c), s1_only.matches(&c) && s2_only.matches(&c));
    }
}

#[test]
fn round_trip_preserves_matching_behavior() {
    let doc = json!({
        "symptoms": [
            {"type": "instruction", "instructionName": "mov", "registerNames": ["rax"]},
            {"type": "testcase", "value": "trigger()"}
        ]
    });
    let sig = CrashSignature::parse(&doc).unwrap();
    let reparsed = CrashSignature::parse(&sig.to_json()).unwrap();

    let mut c = CrashInfo::new();
    c.crash_instruction = Some("mov rax, [rdi]".into());
    c.testcase = Some("setup()\ntrigger()".into());

    assert_eq!(sig.matches(&c), reparsed.matches(&c));
    assert!(sig.matches(&c));
    assert_eq!(sig.to_json(), reparsed.to_json());
}

#[test]
fn unknown_symptom_type_is_rejected() {
    let err = CrashSignature::parse(&json!({
        "symptoms": [{"type": "totallyUnknown"}]
    }))
    .unwrap_err();
    assert!(format!("{err}").contains("totallyUnknown"));
}
