//! Clause sections and the ordered section list
//!
//! A document is an ordered sequence of titled clause sections whose
//! content still carries `{TOKEN}` placeholders. The list is seeded from
//! the built-in EULA template and can be extended, edited, reordered via
//! insert-after, and pruned. Ids are caller-chosen, unique, and stable
//! across edits; order is meaningful (sections render top to bottom).

use crate::error::TemplateError;
use serde::{Deserialize, Serialize};

/// One titled unit of agreement text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseSection {
    pub id: String,
    pub title: String,
    /// Template text with `{TOKEN}` placeholders.
    pub content: String,
    /// Authored by the user rather than seeded from the template.
    #[serde(default)]
    pub is_custom: bool,
}

impl ClauseSection {
    pub fn custom(id: impl Into<String>, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            is_custom: true,
        }
    }
}

/// Ordered, id-addressable collection of clause sections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SectionList {
    sections: Vec<ClauseSection>,
}

impl SectionList {
    /// Empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// List seeded with the built-in EULA template.
    pub fn seeded() -> Self {
        Self {
            sections: default_sections(),
        }
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn as_slice(&self) -> &[ClauseSection] {
        &self.sections
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClauseSection> {
        self.sections.iter()
    }

    /// Append a section at the end.
    pub fn push(&mut self, section: ClauseSection) {
        self.sections.push(section);
    }

    /// Insert a section immediately after the one with `after_id`.
    pub fn insert_after(&mut self, after_id: &str, section: ClauseSection) -> Result<(), TemplateError> {
        let index = self.position(after_id)?;
        self.sections.insert(index + 1, section);
        Ok(())
    }

    /// Replace the title and content of an existing section in place.
    pub fn edit(&mut self, id: &str, title: impl Into<String>, content: impl Into<String>) -> Result<(), TemplateError> {
        let index = self.position(id)?;
        self.sections[index].title = title.into();
        self.sections[index].content = content.into();
        Ok(())
    }

    /// Remove a section. The engine places no restriction on which
    /// sections may be removed; the editing surface decides that.
    pub fn remove(&mut self, id: &str) -> Result<ClauseSection, TemplateError> {
        let index = self.position(id)?;
        Ok(self.sections.remove(index))
    }

    fn position(&self, id: &str) -> Result<usize, TemplateError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| TemplateError::SectionNotFound(id.to_string()))
    }
}

impl<'a> IntoIterator for &'a SectionList {
    type Item = &'a ClauseSection;
    type IntoIter = std::slice::Iter<'a, ClauseSection>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

fn section(id: &str, title: &str, content: &str) -> ClauseSection {
    ClauseSection {
        id: id.into(),
        title: title.into(),
        content: content.into(),
        is_custom: false,
    }
}

/// The built-in agreement template. Square brackets are used inside the
/// clause text where parentheses would read as enumeration markers.
pub fn default_sections() -> Vec<ClauseSection> {
    vec![
        section(
            "parties",
            "1. PARTIES AND DEFINITIONS",
            "This End User License Agreement (\"Agreement\") is entered into on {LICENSE_DATE} between {PROVIDER_NAME} (ABN: {PROVIDER_ABN}) \
of {PROVIDER_ADDRESS} (\"Provider\", \"Licensor\", \"we\", \"us\", or \"our\") and {RECIPIENT_NAME} of {RECIPIENT_ADDRESS} (\"User\", \"Licensee\", \"you\", or \"your\"). \
For the purposes of this Agreement: \"Intellectual Property\" includes but is not limited to copyrights, trademarks, patents, trade secrets, \
and proprietary information; \"Documentation\" means any user manuals, technical specifications, and other materials provided; \"Confidential Information\" \
means any non-public technical or business information; \"Update\" means any bug fix, patch, or minor enhancement; \"Upgrade\" means any major version release requiring additional licensing fees.",
        ),
        section(
            "grant-license",
            "2. GRANT OF LICENSE AND SCOPE",
            "Subject to the terms of this Agreement, compliance with all payment obligations, and Australian law, {PROVIDER_NAME} hereby grants you a limited, \
non-exclusive, non-transferable, revocable license to use {PRODUCT_NAME} [{PRODUCT_TYPE}] version [{VERSION}] for {AUTHORIZED_USE} within {TERRITORY}. \
This license is effective from {LICENSE_DATE} and includes the right to: (a) install and use the {PRODUCT_TYPE} on devices under your direct control; \
(b) make one backup copy for archival purposes; (c) use Documentation in connection with your authorized use. This license does not grant rights to: \
(i) source code or proprietary algorithms; (ii) patents or patent applications; (iii) future versions unless explicitly stated; (iv) technical support beyond basic installation guidance. \
For hardware products, this license covers embedded software and firmware components only.",
        ),
        section(
            "scope-use",
            "3. SCOPE OF USE AND PERMITTED ACTIVITIES",
            "You may use the {PRODUCT_TYPE} solely for {AUTHORIZED_USE} as described: {DESCRIPTION}. \
Permitted activities include: \
(a) normal operation within specified performance parameters; \
(b) integration with compatible third-party systems for authorized purposes; \
(c) reasonable customization of user interfaces and settings; \
(d) data export in standard formats for backup purposes. \
You must ensure: \
(i) compliance with all applicable Australian federal, state, and local laws; \
(ii) implementation of reasonable security measures to protect access credentials; \
(iii) prompt installation of critical security updates; \
(iv) maintenance of accurate usage records if required for licensing compliance. \
For multi-user environments, you are responsible for ensuring all users comply with this Agreement. \
Temporary use by contractors or consultants acting on your behalf is permitted provided they agree to these terms.",
        ),
        section(
            "restrictions",
            "4. RESTRICTIONS AND PROHIBITED USES",
            "You expressly agree not to, and will not permit others to: \
(a) copy, reproduce, or distribute the {PRODUCT_TYPE} except as expressly permitted; \
(b) modify, adapt, alter, translate, or create derivative works; \
(c) reverse engineer, decompile, disassemble, or attempt to derive source code or underlying algorithms; \
(d) remove, alter, or obscure any proprietary notices, labels, or marks; \
(e) rent, lease, loan, sell, sublicense, or otherwise transfer rights; \
(f) use the {PRODUCT_TYPE} to develop competing products or services; \
(g) attempt to circumvent licensing mechanisms or usage limitations; \
(h) use the {PRODUCT_TYPE} in any manner that violates applicable laws, regulations, or third-party rights; \
(i) use the {PRODUCT_TYPE} in critical systems where failure could result in death, personal injury, or environmental damage without express written consent; \
(j) exceed authorized user limits or usage quotas; (k) attempt to gain unauthorized access to Provider systems or other users' data. \
For hardware products, physical tampering, modification of firmware, or unauthorized repair attempts are strictly prohibited and will void this license.",
        ),
        section(
            "intellectual-property",
            "5. INTELLECTUAL PROPERTY RIGHTS AND OWNERSHIP",
            "{PROVIDER_NAME} retains all right, title, and interest in and to the {PRODUCT_TYPE}, including all intellectual property rights, proprietary technology, \
trade secrets, know-how, and any improvements, modifications, or derivative works made by Provider. This Agreement grants no ownership rights and conveys only the \
limited license rights expressly set forth herein. Any feedback, suggestions, or improvements you provide regarding the {PRODUCT_TYPE} become the exclusive property \
of {PROVIDER_NAME} without compensation. You retain ownership of your data but grant Provider a limited license to process such data solely to provide the licensed services. \
Third-party components included in the {PRODUCT_TYPE} remain the property of their respective owners and may be subject to separate license terms. \
You acknowledge that unauthorized use of Provider's intellectual property may cause irreparable harm for which monetary damages would be inadequate, \
and Provider shall be entitled to equitable relief including injunction and specific performance.",
        ),
        section(
            "consumer-guarantees",
            "6. AUSTRALIAN CONSUMER LAW COMPLIANCE",
            "Nothing in this Agreement excludes, restricts, or modifies any consumer guarantee, right, or remedy under the Competition and Consumer Act 2010 [Cth] \
or Australian Consumer Law (\"ACL\") that cannot lawfully be excluded, restricted, or modified. Where the ACL applies and permits limitation of liability, \
our liability for breach of any non-excludable consumer guarantee is limited to, at our option: \
(a) for goods: repair, replacement, or refund of the purchase price; \
(b) for services: re-supply of services or refund of the amount paid. \
These guarantees include that goods are of acceptable quality, fit for purpose, match their description, and that services are provided with due care and skill. \
If you acquire the {PRODUCT_TYPE} for business use where the ACL applies, our liability is limited to the maximum extent permitted by law. \
For international users or business-to-business transactions outside consumer protection, warranties are limited as set forth in Section 8. This Section survives termination of this Agreement.",
        ),
        section(
            "privacy",
            "7. PRIVACY, DATA PROTECTION, AND SECURITY",
            "We collect, use, and disclose personal information in accordance with the Privacy Act 1988 [Cth], Australian Privacy Principles, \
and our Privacy Policy available at {PROVIDER_WEBSITE}/privacy. Types of information collected may include: personal identifiers, usage data, device information, \
and technical logs necessary for service provision and improvement. By using the {PRODUCT_TYPE}, you consent to: (a) collection and processing of personal information \
as described in our Privacy Policy; (b) international transfer of data to jurisdictions with adequate privacy protections; (c) use of cookies and similar technologies \
for functionality and analytics; (d) automated processing for security, fraud prevention, and service optimization. \
You have rights under Australian privacy law including access, correction, and complaint procedures detailed in our Privacy Policy. \
For business users processing personal information of others, you warrant you have appropriate authority and will comply with applicable privacy laws. \
We implement reasonable security measures but cannot guarantee absolute security. You must promptly notify us of any suspected data breaches or unauthorized access.",
        ),
        section(
            "limitation-liability",
            "8. WARRANTY DISCLAIMERS AND LIMITATION OF LIABILITY",
            "To the maximum extent permitted by Australian law and subject to Section 6 (Consumer Law): \
(a) the {PRODUCT_TYPE} is provided \"as is\" and \"as available\" without warranties of any kind; \
(b) {PROVIDER_NAME} disclaims all warranties, express, implied, or statutory, including merchantability, fitness for a \
particular purpose, non-infringement, accuracy, completeness, and uninterrupted operation; \
(c) we do not warrant that the {PRODUCT_TYPE} will meet your requirements, be error-free, secure, or continuously available. \
In no event shall {PROVIDER_NAME} be liable for: \
(i) indirect, incidental, special, consequential, or punitive damages; \
(ii) loss of profits, data, use, or goodwill; \
(iii) business interruption or loss of business opportunities; \
(iv) damages arising from third-party claims or actions. \
Our total liability shall not exceed the amount paid by you in the 12 months preceding the claim or AUD $1,000, whichever is greater. \
These limitations apply regardless of the theory of liability and even if we have been advised of the possibility of such damages. \
Some jurisdictions do not allow limitation of certain warranties or damages, so some limitations may not apply to you.",
        ),
        section(
            "support",
            "9. SUPPORT, MAINTENANCE, AND UPDATES",
            "{PROVIDER_NAME} may, but is not obligated to, provide technical support, maintenance, updates, or upgrades for the {PRODUCT_TYPE}. \
When provided, support is available during Australian business hours (9 AM - 5 PM AWST, Monday-Friday, excluding public holidays) via email at \
{PROVIDER_EMAIL} or through our support portal at {PROVIDER_WEBSITE}/support. Support services include: \
(a) assistance with installation and basic configuration; \
(b) bug fixes and security patches; \
(c) compatibility updates for major operating system changes; \
(d) access to documentation and knowledge base. \
Support does not include: \
(i) custom development or modifications; \
(ii) training or consulting services; \
(iii) support for modified or unauthorized versions; \
(iv) recovery of lost data or configurations; \
(v) support for end-of-life versions beyond 24 months. \
Response times are: \
(a) Critical issues (system down) - 4 business hours; \
(b) High priority - 1 business day; \
(c) Medium priority - 3 business days; \
(d) Low priority - 5 business days. \
Updates may be provided automatically or require manual installation. You are responsible for maintaining current versions and implementing security updates promptly.",
        ),
        section(
            "termination",
            "10. TERMINATION AND POST-TERMINATION OBLIGATIONS",
            "This Agreement remains effective until terminated by either party. You may terminate at any time by: \
(a) providing 30 days written notice; \
(b) ceasing all use of the {PRODUCT_TYPE}; \
(c) destroying or deleting all copies in your possession or control. \
{PROVIDER_NAME} may terminate immediately upon: \
(i) material breach of this Agreement that remains uncured for 15 days after written notice; \
(ii) insolvency, bankruptcy, or assignment for creditors; \
(iii) violation of intellectual property rights; \
(iv) use for illegal purposes; \
(v) non-payment of fees beyond 30 days after due date. \
Upon termination: \
(A) all rights and licenses granted hereunder immediately cease; \
(B) you must cease all use and destroy all copies of the {PRODUCT_TYPE}; \
(C) we may immediately disable access to online services; \
(D) each party must return or destroy confidential information of the other party; \
(E) accrued payment obligations survive termination. \
For subscription services, termination does not entitle you to refunds except as required by law.",
        ),
        section(
            "governing-law",
            "11. GOVERNING LAW, JURISDICTION, AND DISPUTE RESOLUTION",
            "This Agreement is governed by and construed in accordance with the laws of {TERRITORY}, without regard to conflict of law principles. \
Any dispute arising from or relating to this Agreement shall be subject to the exclusive jurisdiction of the courts of {TERRITORY}, and each party \
irrevocably consents to such jurisdiction and venue. The parties acknowledge the application of the Australian Consumer Law where applicable. \
Before commencing formal proceedings, the parties agree to attempt good faith negotiations for 30 days after written notice of dispute. If unresolved, \
disputes may be referred to mediation through the Australian Disputes Centre or similar recognized mediation service, with costs shared equally. \
For claims under AUD $40,000, either party may elect binding arbitration under the Commercial Arbitration Act. The United Nations Convention on Contracts for \
the International Sale of Goods does not apply to this Agreement. If any provision is held invalid or unenforceable, the remainder shall remain in full force and \
effect, and the invalid provision shall be deemed modified to the minimum extent necessary to make it enforceable. This Agreement constitutes the entire agreement \
between the parties and supersedes all prior negotiations, representations, or agreements relating to the subject matter herein. Amendments must be in writing and \
signed by both parties. Waiver of any breach does not waive subsequent breaches. Headings are for convenience only and do not affect interpretation.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_list_has_eleven_sections_with_unique_ids() {
        let list = SectionList::seeded();
        assert_eq!(list.len(), 11);

        let mut ids: Vec<&str> = list.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 11, "section ids must be unique");
        assert!(list.iter().all(|s| !s.is_custom));
    }

    #[test]
    fn test_insert_after_places_section_in_order() {
        let mut list = SectionList::seeded();
        let custom = ClauseSection::custom("custom-1", "EXPORT CONTROLS", "You must comply with export laws.");
        list.insert_after("restrictions", custom).unwrap();

        let ids: Vec<&str> = list.iter().map(|s| s.id.as_str()).collect();
        let at = ids.iter().position(|&id| id == "restrictions").unwrap();
        assert_eq!(ids[at + 1], "custom-1");
        assert_eq!(list.len(), 12);
    }

    #[test]
    fn test_insert_after_unknown_id_fails() {
        let mut list = SectionList::seeded();
        let err = list
            .insert_after("nope", ClauseSection::custom("x", "T", "C"))
            .unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_edit_keeps_id_and_position() {
        let mut list = SectionList::seeded();
        list.edit("privacy", "7. PRIVACY", "Rewritten clause.").unwrap();

        let edited = list.iter().find(|s| s.id == "privacy").unwrap();
        assert_eq!(edited.title, "7. PRIVACY");
        assert_eq!(edited.content, "Rewritten clause.");
        assert_eq!(list.len(), 11);
    }

    #[test]
    fn test_remove_works_on_any_section() {
        // Only custom sections are removable in the editing UI; the
        // engine itself does not care.
        let mut list = SectionList::seeded();
        let removed = list.remove("support").unwrap();
        assert_eq!(removed.id, "support");
        assert_eq!(list.len(), 10);
        assert!(list.remove("support").is_err());
    }
}
