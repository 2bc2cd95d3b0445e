#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

/// A named detection query, fixed for the process lifetime.
#[derive(Debug, Clone, Copy)]
pub struct QueryDefinition {
    pub name: &'static str,
    pub severity: Severity,
    pub query: &'static str,
}

// The ago() guards match the 5 minute default interval; the timespan sent
// with each request narrows the window further when the interval is shorter.
pub const MONITORING_QUERIES: [QueryDefinition; 5] = [
    QueryDefinition {
        name: "honey_user_activity",
        severity: Severity::Critical,
        query: r#"SigninLogs
| where TimeGenerated > ago(5m)
| where UserPrincipalName contains "@" and UserPrincipalName contains "autopot"
| project TimeGenerated, UserPrincipalName, IPAddress, Location, ResultType, ResultDescription, UserAgent
| order by TimeGenerated desc"#,
    },
    QueryDefinition {
        name: "sql_access_attempts",
        severity: Severity::High,
        query: r#"AzureDiagnostics
| where TimeGenerated > ago(5m)
| where ResourceProvider == "MICROSOFT.SQL"
| where Category == "SQLSecurityAuditEvents"
| where action_name_s in ("LOGIN", "LOGOUT", "DATABASE_OBJECT_ACCESS_GROUP")
| project TimeGenerated, server_name_s, client_ip_s, server_principal_name_s, action_name_s, succeeded_s, statement_s
| order by TimeGenerated desc"#,
    },
    QueryDefinition {
        name: "keyvault_access",
        severity: Severity::Medium,
        query: r#"KeyVaultData
| where TimeGenerated > ago(5m)
| where OperationName in ("SecretGet", "SecretList", "SecretSet", "SecretDelete")
| project TimeGenerated, OperationName, CallerIpAddress, identity_claim_appid_g, id_s, ResultSignature
| order by TimeGenerated desc"#,
    },
    QueryDefinition {
        name: "web_portal_access",
        severity: Severity::Medium,
        query: r#"AppServiceHTTPLogs
| where TimeGenerated > ago(5m)
| where CsHost contains "portal-"
| summarize RequestCount = count(), UniqueIPs = dcount(CIp), StatusCodes = make_set(ScStatus) by CIp, bin(TimeGenerated, 1m)
| where RequestCount > 5
| order by TimeGenerated desc"#,
    },
    QueryDefinition {
        name: "privilege_escalation",
        severity: Severity::Critical,
        query: r#"AuditLogs
| where TimeGenerated > ago(5m)
| where OperationName in ("Add member to role", "Add eligible member to role", "Activate role")
| project TimeGenerated, OperationName, InitiatedBy, TargetResources, Result
| order by TimeGenerated desc"#,
    },
];
