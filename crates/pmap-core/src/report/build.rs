//! Maps a [`MapperResult`] onto the report contract.
//!
//! The match below is exhaustive on purpose: adding an outcome state must
//! force a decision about what the report says for it.

use crate::report::model::{ErrorCode, GuardrailInfo, OutputsInfo, Report, ReportError};
use crate::result::model::{MapperResult, OkResult, ProfileResolution, Status};

pub fn build_report(result: &MapperResult) -> Report {
    let status = result.status();

    match result {
        MapperResult::Ok(OkResult::Profile(resolved)) => resolved_report(status, resolved),

        MapperResult::Ok(OkResult::Stream(stream)) => Report::new(
            status,
            stream.input_summary.clone(),
            Some(stream.profile.clone()),
            OutputsInfo {
                generated_task_path: None,
                report_path: stream.report_path.clone(),
            },
        ),

        MapperResult::Trimmed(trimmed) => {
            let mut report = resolved_report(status, &trimmed.resolved);
            report.warnings = vec![trimmed.warning.clone()];
            report.guardrails = Some(GuardrailInfo {
                applied: true,
                policy: trimmed.policy,
                reason: trimmed.reason.clone(),
                method: Some(trimmed.method),
                before: trimmed.before,
                after: Some(trimmed.after),
            });
            report
        }

        MapperResult::Denied(denied) => {
            let mut report = Report::new(
                status,
                denied.input_summary.clone(),
                Some(denied.profile.clone()),
                OutputsInfo {
                    generated_task_path: None,
                    report_path: denied.report_path.clone(),
                },
            );
            report.errors = vec![ReportError {
                code: ErrorCode::MapperDenied,
                message: denied.message.clone(),
            }];
            report.guardrails = Some(GuardrailInfo {
                applied: true,
                policy: denied.policy,
                reason: denied.reason.clone(),
                method: None,
                before: denied.before,
                after: None,
            });
            report
        }

        MapperResult::Error(failed) => {
            let mut report = Report::new(
                status,
                failed.input_summary.clone(),
                failed.profile.clone(),
                OutputsInfo {
                    generated_task_path: None,
                    report_path: failed.report_path.clone(),
                },
            );
            report.errors = vec![ReportError {
                code: ErrorCode::MapperInternalError,
                message: failed.message.clone(),
            }];
            report
        }
    }
}

fn resolved_report(status: Status, resolved: &ProfileResolution) -> Report {
    let mut report = Report::new(
        status,
        resolved.input_summary.clone(),
        Some(resolved.profile.clone()),
        OutputsInfo {
            generated_task_path: Some(resolved.task_path.clone()),
            report_path: resolved.report_path.clone(),
        },
    );
    report.resolution = Some(resolved.resolution.clone());
    report
}
