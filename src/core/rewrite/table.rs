//! Built-in relocation table for the seatrans feature-package migration.
//!
//! Flat layer packages (`controller`, `service`, `repository`, `entity`, `dto`)
//! move under `features.<feature>.<layer>`. Entries are listed in application
//! order and expanded into [`RuleSpec`]s by [`builtin_rules`].

use super::rule::RuleSpec;

/// Package every built-in import lives under.
pub const BASE_PACKAGE: &str = "com.example.seatrans";

/// Note attached to wildcard rules, which cannot know what the `*` covers.
pub const WILDCARD_NOTE: &str =
    "wildcard import redirected to the logistics feature; verify which symbols it actually covers";

/// One import relocation, relative to [`BASE_PACKAGE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// `import <from>.<class>;` → `import <to>.<class>;`
    Class(&'static str, &'static str, &'static str),
    /// `import <from>.<anything>;` → `import <to>.<anything>;`
    SubPackage(&'static str, &'static str),
    /// `import <from>.*;` → `import <to>.*;`
    Wildcard(&'static str, &'static str),
}

use Relocation::{Class, SubPackage, Wildcard};

pub const RELOCATIONS: &[Relocation] = &[
    // Pricing feature
    // controllers
    Class("controller", "features.pricing.controller", "FeeConfigurationController"),
    Class("controller", "features.pricing.controller", "PublicCalculatorController"),
    // services
    Class("service", "features.pricing.service", "FeeConfigurationService"),
    SubPackage("service.pricing", "features.pricing.service"),
    // repositories
    Class("repository", "features.pricing.repository", "FeeConfigurationRepository"),
    Class("repository", "features.pricing.repository", "PriceCalculationRepository"),
    Class("repository", "features.pricing.repository", "RateTableRepository"),
    Class("repository", "features.pricing.repository", "SavedEstimateRepository"),
    // models
    Class("entity.PricingManagement", "features.pricing.model", "FeeConfiguration"),
    Class("entity.PricingManagement", "features.pricing.model", "FeeFormulaType"),
    Class("entity.PricingManagement", "features.pricing.model", "FeeStatus"),
    Class("entity", "features.pricing.model", "PriceCalculation"),
    Class("entity", "features.pricing.model", "RateTable"),
    Class("entity", "features.pricing.model", "SavedEstimate"),
    // dtos
    Class("dto.request", "features.pricing.dto", "CreateFeeConfigDTO"),
    Class("dto.request", "features.pricing.dto", "UpdateFeeConfigDTO"),
    Class("dto.response", "features.pricing.dto", "FeeConfigResponseDTO"),
    Class("dto", "features.pricing.dto", "EstimateDTO"),
    Class("dto", "features.pricing.dto", "CalculationStepDTO"),

    // Logistics feature
    // models
    Class("entity", "features.logistics.model", "Order"),
    Class("entity", "features.logistics.model", "OrderItem"),
    Class("entity", "features.logistics.model", "Port"),
    Class("entity", "features.logistics.model", "Province"),
    Class("entity", "features.logistics.model", "Quotation"),
    Class("entity", "features.logistics.model", "QuotationItem"),
    Class("entity", "features.logistics.model", "ServiceRequest"),
    // ServiceType belongs to gallery, not logistics.
    Class("entity.PricingManagement", "features.gallery.model", "ServiceType"),
    Class("entity", "features.logistics.model", "ServiceTypeEntity"),
    // repositories
    Class("repository", "features.logistics.repository", "OrderRepository"),
    Class("repository", "features.logistics.repository", "OrderItemRepository"),
    Class("repository", "features.logistics.repository", "PortRepository"),
    Class("repository", "features.logistics.repository", "ProvinceRepository"),
    Class("repository", "features.logistics.repository", "QuotationRepository"),
    Class("repository", "features.logistics.repository", "QuotationItemRepository"),
    Class("repository", "features.logistics.repository", "ServiceRequestRepository"),
    Class("repository", "features.logistics.repository", "ServiceTypeRepository"),
    // services
    Class("service", "features.logistics.service", "OrderService"),
    Class("service", "features.logistics.service", "PortService"),
    Class("service", "features.logistics.service", "ProvinceService"),
    Class("service", "features.logistics.service", "QuotationService"),
    Class("service", "features.logistics.service", "ServiceRequestService"),
    Class("service", "features.logistics.service", "ServiceTypeService"),
    // controllers
    Class("controller", "features.logistics.controller", "CustomerOrderController"),
    Class("controller", "features.logistics.controller", "CustomerRequestController"),
    Class("controller", "features.logistics.controller", "EmployeeQuotationController"),
    Class("controller", "features.logistics.controller", "PortController"),
    Class("controller", "features.logistics.controller", "ProvinceController"),
    Class("controller", "features.logistics.controller", "ServiceTypeController"),
    // dtos
    Class("dto", "features.logistics.dto", "OrderDTO"),
    Class("dto", "features.logistics.dto", "PortDTO"),
    Class("dto", "features.logistics.dto", "ProvinceDTO"),
    Class("dto", "features.logistics.dto", "QuotationDTO"),
    Class("dto", "features.logistics.dto", "QuotationInternalDTO"),
    Class("dto", "features.logistics.dto", "QuotationItemDTO"),
    Class("dto", "features.logistics.dto", "ServiceRequestDTO"),
    Class("dto", "features.logistics.dto", "ServiceTypeDTO"),
    Class("dto.request", "features.logistics.dto", "CharteringRequestDTO"),
    Class("dto.request", "features.logistics.dto", "CreatePortRequest"),
    Class("dto.request", "features.logistics.dto", "CreateProvinceRequest"),
    Class("dto.request", "features.logistics.dto", "CreateServiceTypeRequest"),
    Class("dto.request", "features.logistics.dto", "LogisticsRequestDTO"),
    Class("dto.request", "features.logistics.dto", "ShippingAgencyRequestDTO"),

    // wildcards
    Wildcard("entity", "features.logistics.model"),
    Wildcard("repository", "features.logistics.repository"),
    Wildcard("service", "features.logistics.service"),
    Wildcard("dto", "features.logistics.dto"),
];

impl Relocation {
    pub fn to_rule(self) -> RuleSpec {
        let base = regex::escape(BASE_PACKAGE);
        match self {
            Class(from, to, class) => RuleSpec::new(
                format!(
                    r"import {}\.{}\.{};",
                    base,
                    regex::escape(from),
                    regex::escape(class)
                ),
                format!("import {}.{}.{};", BASE_PACKAGE, to, class),
            ),
            SubPackage(from, to) => RuleSpec::new(
                format!(r"import {}\.{}\.(.*);", base, regex::escape(from)),
                format!("import {}.{}.${{1}};", BASE_PACKAGE, to),
            ),
            Wildcard(from, to) => RuleSpec::new(
                format!(r"import {}\.{}\.\*;", base, regex::escape(from)),
                format!("import {}.{}.*;", BASE_PACKAGE, to),
            )
            .flagged(WILDCARD_NOTE),
        }
    }
}

/// The built-in rule list, in application order.
pub fn builtin_rules() -> Vec<RuleSpec> {
    RELOCATIONS.iter().map(|r| r.to_rule()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_rule_escapes_package_dots() {
        let rule = Class("entity", "features.logistics.model", "Order").to_rule();
        assert_eq!(rule.pattern, r"import com\.example\.seatrans\.entity\.Order;");
        assert_eq!(
            rule.replacement,
            "import com.example.seatrans.features.logistics.model.Order;"
        );
        assert!(rule.note.is_none());
    }

    #[test]
    fn sub_package_rule_captures_suffix() {
        let rule = SubPackage("service.pricing", "features.pricing.service").to_rule();
        assert_eq!(
            rule.pattern,
            r"import com\.example\.seatrans\.service\.pricing\.(.*);"
        );
        assert_eq!(
            rule.replacement,
            "import com.example.seatrans.features.pricing.service.${1};"
        );
    }

    #[test]
    fn wildcard_rule_escapes_star_and_is_flagged() {
        let rule = Wildcard("dto", "features.logistics.dto").to_rule();
        assert_eq!(rule.pattern, r"import com\.example\.seatrans\.dto\.\*;");
        assert_eq!(rule.replacement, "import com.example.seatrans.features.logistics.dto.*;");
        assert_eq!(rule.note.as_deref(), Some(WILDCARD_NOTE));
    }

    #[test]
    fn builtin_order_is_stable() {
        let rules = builtin_rules();
        assert_eq!(rules.len(), 66);
        assert!(rules[0].pattern.contains("FeeConfigurationController"));
        assert!(rules[3].pattern.ends_with(r"pricing\.(.*);"));
        assert!(rules[62..].iter().all(|r| r.note.is_some()));
        assert!(rules[..62].iter().all(|r| r.note.is_none()));
    }
}
