//! Fixed Product Advertising API 5.0 identifiers.
//!
//! Everything in here is part of the upstream wire contract. Changing any
//! value (casing included) makes PA-API reject the signature.

/// Signing protocol constants.
pub mod signing {
    /// Signature algorithm name, first line of the string to sign.
    pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

    /// Prefix prepended to the secret key before the first HMAC round.
    pub const SECRET_PREFIX: &str = "AWS4";

    /// Terminator of the credential scope.
    pub const SCOPE_TERMINATOR: &str = "aws4_request";

    /// Signed header names, in canonical order.
    pub const SIGNED_HEADERS: &str = "content-encoding;content-type;host;x-amz-date;x-amz-target";

    /// Timestamp layout for `x-amz-date`.
    pub const AMZ_DATE_FORMAT: &str = "%Y%m%dT%H%M%SZ";
}

/// GetItems endpoint and header values.
pub mod get_items {
    /// HTTP method.
    pub const METHOD: &str = "POST";

    /// Canonical URI.
    pub const PATH: &str = "/paapi5/getitems";

    /// Canonical query string (GetItems carries everything in the body).
    pub const QUERY: &str = "";

    /// `content-encoding` header value.
    pub const CONTENT_ENCODING: &str = "amz-1.0";

    /// `content-type` header value.
    pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

    /// `x-amz-target` header value.
    pub const TARGET: &str = "com.amazon.paapi5.v1.ProductAdvertisingAPIv1.GetItems";
}

/// The single marketplace this relay talks to.
pub mod marketplace {
    /// API host.
    pub const HOST: &str = "webservices.amazon.com.br";

    /// Marketplace name sent in the payload.
    pub const MARKETPLACE: &str = "www.amazon.com.br";

    /// Credential scope region.
    pub const REGION: &str = "us-east-1";

    /// Credential scope service.
    pub const SERVICE: &str = "ProductAdvertisingAPI";

    /// Partner type sent in the payload.
    pub const PARTNER_TYPE: &str = "Associates";
}

/// Resources requested for every item.
pub const RESOURCES: &[&str] = &[
    "BrowseNodeInfo.BrowseNodes",
    "BrowseNodeInfo.BrowseNodes.Ancestor",
    "BrowseNodeInfo.BrowseNodes.SalesRank",
    "BrowseNodeInfo.WebsiteSalesRank",
    "Images.Primary.Small",
    "Images.Primary.Medium",
    "Images.Primary.Large",
    "Images.Variants.Small",
    "Images.Variants.Medium",
    "Images.Variants.Large",
    "ItemInfo.ByLineInfo",
    "ItemInfo.Classifications",
    "ItemInfo.ContentInfo",
    "ItemInfo.ContentRating",
    "ItemInfo.ExternalIds",
    "ItemInfo.Features",
    "ItemInfo.ManufactureInfo",
    "ItemInfo.ProductInfo",
    "ItemInfo.TechnicalInfo",
    "ItemInfo.Title",
    "ItemInfo.TradeInInfo",
    "Offers.Listings.Availability.MaxOrderQuantity",
    "Offers.Listings.Availability.Message",
    "Offers.Listings.Availability.MinOrderQuantity",
    "Offers.Listings.Availability.Type",
    "Offers.Listings.Condition",
    "Offers.Listings.Condition.ConditionNote",
    "Offers.Listings.Condition.SubCondition",
    "Offers.Listings.DeliveryInfo.IsAmazonFulfilled",
    "Offers.Listings.DeliveryInfo.IsFreeShippingEligible",
    "Offers.Listings.DeliveryInfo.IsPrimeEligible",
    "Offers.Listings.IsBuyBoxWinner",
    "Offers.Listings.LoyaltyPoints.Points",
    "Offers.Listings.MerchantInfo",
    "Offers.Listings.Price",
    "Offers.Listings.ProgramEligibility.IsPrimeExclusive",
    "Offers.Listings.ProgramEligibility.IsPrimePantry",
    "Offers.Listings.Promotions",
    "Offers.Listings.SavingBasis",
    "Offers.Summaries.HighestPrice",
    "Offers.Summaries.LowestPrice",
    "Offers.Summaries.OfferCount",
    "ParentASIN",
];
