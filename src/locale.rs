use std::fmt;

/// Locales an issue can be written in. Chosen by a label on the issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

/// Every user-facing string the bot reads or writes for one locale.
#[derive(Debug)]
pub struct Messages {
    pub info_heading: &'static str,
    pub template_heading: &'static str,
    pub tests_heading: &'static str,
    /// `{no}` is replaced with the issue number
    pub pr_created: &'static str,
    pub pr_updated: &'static str,
    pub invalid_issue: &'static str,
    pub preview_badge: &'static str,
}

const EN: Messages = Messages {
    info_heading: "Info",
    template_heading: "Template",
    tests_heading: "Test Cases",
    pr_created: "#{no} - Pull Request created.",
    pr_updated: "#{no} - Pull Request updated.",
    invalid_issue: "Failed to parse the issue, please follow the template.",
    preview_badge: "Preview",
};

const ZH_CN: Messages = Messages {
    info_heading: "基本信息",
    template_heading: "题目模版",
    tests_heading: "判题测试",
    pr_created: "#{no} - PR 已生成",
    pr_updated: "#{no} - PR 已更新",
    invalid_issue: "Issue 格式不正确，请按照模版进行修正",
    preview_badge: "预览",
};

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::En, Locale::ZhCn];

    /// Label value and file-name suffix of this locale.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }

    /// First non-default locale whose code appears as a label, else English.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Locale {
        Locale::ALL
            .into_iter()
            .filter(|locale| *locale != Locale::default())
            .find(|locale| labels.iter().any(|l| l.as_ref() == locale.code()))
            .unwrap_or_default()
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::En => &EN,
            Locale::ZhCn => &ZH_CN,
        }
    }

    /// `info.yml` for the default locale, `info.zh-CN.yml` otherwise.
    pub fn localized_file(self, stem: &str, ext: &str) -> String {
        if self == Locale::default() {
            format!("{stem}.{ext}")
        } else {
            format!("{stem}.{}.{ext}", self.code())
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Messages {
    pub fn pr_created(&self, issue_number: u64) -> String {
        self.pr_created.replace("{no}", &issue_number.to_string())
    }

    pub fn pr_updated(&self, issue_number: u64) -> String {
        self.pr_updated.replace("{no}", &issue_number.to_string())
    }
}
