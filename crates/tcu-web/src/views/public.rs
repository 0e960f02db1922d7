use crate::catalog::{
    ACHIEVEMENTS, BLOG_POSTS, CORE_VALUES, FAQS, ORDER_SUMMARY, PRODUCTS, Product, RELATED_NEWS,
    SOLUTIONS, TESTIMONIALS,
};
use crate::contact_flow::ContactFlow;
use crate::dates::format_date;
use crate::session::Flash;
use crate::validation::{CHECKOUT_COUNTRIES, CONTACT_PREFERENCES, CheckoutForm, FieldErrors};

use super::{Section, escape, field_error, input, page, select};

fn product_cards() -> String {
    let mut out = String::from("<div class=\"product-grid\">\n");
    for p in PRODUCTS {
        out.push_str(&format!(
            "<a class=\"product-card\" href=\"/products/{slug}\">\n<img src=\"{image}\" alt=\"{name}\">\n\
             <span class=\"product-id\">{id}</span>\n<h3>{name}</h3>\n<p>{description}</p>\n</a>\n",
            slug = escape(p.slug),
            image = escape(p.image),
            name = escape(p.name),
            id = escape(p.id),
            description = escape(p.description),
        ));
    }
    out.push_str("</div>\n");
    out
}

fn testimonial_cards() -> String {
    let mut out = String::from("<div class=\"testimonials\">\n");
    for t in TESTIMONIALS {
        out.push_str(&format!(
            "<figure class=\"testimonial\">\n<div class=\"rating\" aria-label=\"{rating} out of 5\">{stars}</div>\n\
             <blockquote>{quote}</blockquote>\n<figcaption><img src=\"{image}\" alt=\"\">\
             <strong>{author}</strong> <span>{role}</span></figcaption>\n</figure>\n",
            rating = t.rating,
            stars = "★".repeat(t.rating as usize),
            quote = escape(t.quote),
            image = escape(t.image),
            author = escape(t.author),
            role = escape(t.role),
        ));
    }
    out.push_str("</div>\n");
    out
}

fn faq_list() -> String {
    let mut out = String::from("<section class=\"faqs\">\n<h2>Frequently Asked Questions</h2>\n");
    for (question, answer) in FAQS {
        out.push_str(&format!(
            "<details>\n<summary>{}</summary>\n<p>{}</p>\n</details>\n",
            escape(question),
            escape(answer)
        ));
    }
    out.push_str("</section>\n");
    out
}

fn titled_list(title: &str, items: &[(&str, &str)]) -> String {
    let mut out = format!("<section>\n<h2>{}</h2>\n<ul class=\"cards\">\n", escape(title));
    for (name, text) in items {
        out.push_str(&format!("<li><h3>{}</h3><p>{}</p></li>\n", escape(name), escape(text)));
    }
    out.push_str("</ul>\n</section>\n");
    out
}

pub fn home(flash: &[Flash]) -> String {
    let body = format!(
        "<section class=\"hero\">\n<h1>AI-powered security for homes and businesses</h1>\n\
         <p>Smart cameras that see what matters.</p>\n<a class=\"button\" href=\"/products\">Explore products</a>\n\
         </section>\n<section>\n<h2>Featured Products</h2>\n{}</section>\n\
         <section>\n<h2>What our customers say</h2>\n{}</section>\n{}",
        product_cards(),
        testimonial_cards(),
        faq_list()
    );
    page("Home", Some(Section::Home), flash, &body)
}

pub fn about(flash: &[Flash]) -> String {
    let mut body = String::from(
        "<section class=\"about\">\n<h1>About TCU</h1>\n<p>TCU builds AI surveillance cameras and the \
         software around them, from a single doorbell to multi-building deployments.</p>\n</section>\n",
    );
    body.push_str(&titled_list("Our Core Values", CORE_VALUES));
    body.push_str("<section class=\"achievements\">\n");
    for (figure, label) in ACHIEVEMENTS {
        body.push_str(&format!("<div><strong>{}</strong><span>{}</span></div>\n", escape(figure), escape(label)));
    }
    body.push_str("</section>\n");
    page("About Us", Some(Section::About), flash, &body)
}

pub fn products(flash: &[Flash]) -> String {
    let body = format!("<section>\n<h1>Our Products</h1>\n{}</section>\n", product_cards());
    page("Products", Some(Section::Products), flash, &body)
}

pub fn product_detail(product: &Product, flash: &[Flash]) -> String {
    let mut body = format!(
        "<section class=\"product-detail\">\n<h1>{name}</h1>\n<p class=\"product-id\">{id}</p>\n<div class=\"gallery\">\n",
        name = escape(product.name),
        id = escape(product.id),
    );
    for (src, alt) in product.gallery {
        body.push_str(&format!("<img src=\"{}\" alt=\"{}\">\n", escape(src), escape(alt)));
    }
    body.push_str(&format!(
        "</div>\n<p>{}</p>\n<p class=\"price\">${:.2}</p>\n<ul class=\"features\">\n",
        escape(product.description),
        product.price
    ));
    for (title, text) in product.features {
        body.push_str(&format!("<li><h3>{}</h3><p>{}</p></li>\n", escape(title), escape(text)));
    }
    body.push_str("</ul>\n<a class=\"button\" href=\"/checkout\">Buy now</a>\n</section>\n");
    page(product.name, Some(Section::Products), flash, &body)
}

pub fn solutions(flash: &[Flash]) -> String {
    let body = titled_list("Solutions", SOLUTIONS);
    page("Solutions", Some(Section::Solutions), flash, &body)
}

pub fn blogs(flash: &[Flash]) -> String {
    let mut body = String::from("<section class=\"blogs\">\n<h1>Blogs</h1>\n");
    for post in BLOG_POSTS {
        body.push_str(&format!(
            "<article>\n<h2>{}</h2>\n<time>{}</time>\n",
            escape(post.title),
            format_date(post.date)
        ));
        if let Some(image) = post.image {
            body.push_str(&format!("<img src=\"{}\" alt=\"\">\n", escape(image)));
        }
        for paragraph in post.paragraphs {
            body.push_str(&format!("<p>{}</p>\n", escape(paragraph)));
        }
        body.push_str("</article>\n");
    }
    body.push_str("<aside>\n<h3>Related news</h3>\n<ul>\n");
    for headline in RELATED_NEWS {
        body.push_str(&format!("<li>{}</li>\n", escape(headline)));
    }
    body.push_str("</ul>\n</aside>\n</section>\n");
    page("Blogs", Some(Section::Blogs), flash, &body)
}

pub fn testimonials(flash: &[Flash]) -> String {
    let body = format!(
        "<section>\n<h1>Testimonials</h1>\n{}</section>\n{}",
        testimonial_cards(),
        faq_list()
    );
    page("Testimonials", Some(Section::Testimonials), flash, &body)
}

// -- Contact --

fn contact_form(flow: &ContactFlow) -> String {
    let (values, errors) = match flow {
        ContactFlow::Form(stage) => (stage.values.clone(), stage.errors.clone()),
        _ => Default::default(),
    };

    let mut out = String::from(
        "<h2>Contact with Our Team Members</h2>\n<p>Any queries about our business.</p>\n\
         <form method=\"post\" action=\"/contactus\" class=\"contact-form\">\n",
    );
    out.push_str("<fieldset class=\"channels\">\n<legend>Preferred contact channel</legend>\n");
    for channel in CONTACT_PREFERENCES {
        let checked = if values.contact_preference == *channel { " checked" } else { "" };
        out.push_str(&format!(
            "<label><input type=\"radio\" name=\"contactPreference\" value=\"{c}\"{checked}> {c}</label>\n",
            c = channel,
            checked = checked,
        ));
    }
    out.push_str("</fieldset>\n");
    out.push_str(&field_error(&errors, "contactPreference"));
    out.push_str(&input("text", "firstName", "First Name", &values.first_name, &errors));
    out.push_str(&input("text", "lastName", "Last Name", &values.last_name, &errors));
    out.push_str(&input("email", "email", "Email", &values.email, &errors));
    out.push_str(&input("tel", "phone", "Phone", &values.phone, &errors));
    out.push_str(&input("text", "companyName", "Company Name", &values.company_name, &errors));
    out.push_str(&input("text", "country", "Country", &values.country, &errors));
    out.push_str(&input("text", "jobTitle", "Job Title", &values.job_title, &errors));
    out.push_str(&format!(
        "<label>Job Details\n<textarea name=\"jobDetails\" rows=\"5\">{}</textarea>\n</label>\n",
        escape(&values.job_details)
    ));
    out.push_str("<button type=\"submit\">Submit</button>\n</form>\n");
    out
}

fn verification(flow: &ContactFlow, cooldown: Option<u64>) -> String {
    let ContactFlow::Verification(stage) = flow else {
        return String::new();
    };
    let mut out = format!(
        "<h2>Verify your email</h2>\n<p>We sent a 6-digit code to <strong>{}</strong>.</p>\n\
         <form method=\"post\" action=\"/contactus/verify\">\n\
         <label>Verification code\n<input type=\"text\" name=\"code\" inputmode=\"numeric\" maxlength=\"6\" autocomplete=\"one-time-code\">\n</label>\n",
        escape(&stage.submission.email)
    );
    if let Some(error) = &stage.error {
        out.push_str(&format!("<p class=\"field-error\">{}</p>\n", escape(error)));
    }
    out.push_str("<button type=\"submit\">Verify and send</button>\n</form>\n");

    match cooldown {
        Some(left) if left > 0 => out.push_str(&format!(
            "<p class=\"cooldown\" data-seconds=\"{left}\">You can request a new code in {left} seconds.</p>\n"
        )),
        _ => out.push_str(
            "<form method=\"post\" action=\"/contactus/resend\"><button type=\"submit\">Resend code</button></form>\n",
        ),
    }
    out.push_str(
        "<form method=\"post\" action=\"/contactus/back\"><button type=\"submit\" class=\"link\">Back to form</button></form>\n",
    );
    out
}

/// Contact page for whichever stage the visitor's flow is in.
pub fn contact(flow: &ContactFlow, cooldown: Option<u64>, flash: &[Flash]) -> String {
    let stage = match flow {
        ContactFlow::Form(_) => contact_form(flow),
        ContactFlow::Verification(_) => verification(flow, cooldown),
        ContactFlow::Success => String::from(
            "<h2>Thank you!</h2>\n<p>Your query has been sent. Our team will get back to you soon.</p>\n\
             <form method=\"post\" action=\"/contactus/reset\"><button type=\"submit\">Send another query</button></form>\n",
        ),
    };
    let body = format!(
        "<section class=\"contact\" data-stage=\"{}\">\n{}</section>\n{}",
        flow.stage_name(),
        stage,
        faq_list()
    );
    page("Contact Us", Some(Section::Contact), flash, &body)
}

// -- Checkout --

pub fn checkout(form: &CheckoutForm, errors: &FieldErrors, flash: &[Flash]) -> String {
    let countries: Vec<(&str, &str)> = CHECKOUT_COUNTRIES.iter().map(|c| (*c, *c)).collect();
    let summary = &ORDER_SUMMARY;

    let mut body = format!(
        "<section class=\"checkout\">\n<aside class=\"order-summary\">\n<h2>Order summary</h2>\n\
         <p>{product} <span>${price:.2}</span></p>\n<dl>\n<dt>Subtotal</dt><dd>${subtotal:.2}</dd>\n\
         <dt>VAT</dt><dd>${vat:.2}</dd>\n<dt>Total</dt><dd>${total:.2}</dd>\n</dl>\n</aside>\n\
         <form method=\"post\" action=\"/checkout\" class=\"billing\">\n<h2>Billing details</h2>\n",
        product = escape(summary.product),
        price = summary.price,
        subtotal = summary.subtotal,
        vat = summary.vat,
        total = summary.total,
    );
    body.push_str(&input("text", "firstName", "First Name", &form.first_name, errors));
    body.push_str(&input("text", "lastName", "Last Name", &form.last_name, errors));
    body.push_str(&input("email", "email", "Email", &form.email, errors));
    body.push_str(&select("country", "Country", &countries, &form.country, errors));
    let checked = if form.terms_accepted() { " checked" } else { "" };
    body.push_str(&format!(
        "<label><input type=\"checkbox\" name=\"termsAndConditions\" value=\"on\"{}> I agree to the terms and conditions</label>\n",
        checked
    ));
    body.push_str(&field_error(errors, "termsAndConditions"));
    body.push_str("<h2>Payment</h2>\n");
    body.push_str(&input("text", "cardNumber", "Card Number", &form.card_number, errors));
    body.push_str(&input("text", "expiration", "Expiration (MM/YY)", &form.expiration, errors));
    body.push_str(&input("text", "cvc", "CVC", &form.cvc, errors));
    body.push_str(&select("cardCountry", "Card Country", &countries, &form.card_country, errors));
    body.push_str(&format!(
        "<button type=\"submit\">Pay ${:.2}</button>\n</form>\n</section>\n",
        summary.total
    ));
    page("Checkout", Some(Section::Products), flash, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    use crate::validation::ContactForm;

    #[test]
    fn product_detail_lists_gallery_and_features() {
        let doorbell = crate::catalog::find_product("tbe-22").unwrap();
        let html = product_detail(doorbell, &[]);
        assert!(html.contains("TCU Smart Battery Video Doorbell - night vision demo"));
        assert!(html.contains("2K 5MP starlight"));
        assert!(html.contains("href=\"/products\" class=\"active\""));
    }

    #[test]
    fn contact_form_keeps_values_and_errors() {
        let mut flow = ContactFlow::default();
        let values = ContactForm { first_name: "<Aye>".into(), ..Default::default() };
        assert!(flow.validate_form(values).is_none());
        let html = contact(&flow, None, &[]);
        assert!(html.contains("value=\"&lt;Aye&gt;\""));
        assert!(html.contains("Last name is required"));
        assert!(html.contains("data-stage=\"form\""));
    }

    #[test]
    fn verification_shows_countdown_then_resend() {
        let now = Instant::now();
        let mut flow = ContactFlow::default();
        let values = ContactForm {
            first_name: "Aye".into(),
            last_name: "Chan".into(),
            email: "aye@example.com".into(),
            phone: "+959123456".into(),
            company_name: "TCU".into(),
            country: "Myanmar".into(),
            job_title: "Ops".into(),
            ..Default::default()
        };
        let submission = flow.validate_form(values.clone()).unwrap();
        flow.code_sent(values, submission, now);

        let waiting = contact(&flow, flow.cooldown_remaining(now), &[]);
        assert!(waiting.contains("You can request a new code in 60 seconds."));
        assert!(!waiting.contains("/contactus/resend"));

        let ready = contact(&flow, Some(0), &[]);
        assert!(ready.contains("/contactus/resend"));
    }

    #[test]
    fn checkout_shows_fixed_summary() {
        let html = checkout(&CheckoutForm::default(), &FieldErrors::new(), &[]);
        assert!(html.contains("TCU-28 Indoor Camera"));
        assert!(html.contains("$999.69"));
        assert!(html.contains("<option value=\"South Africa\" selected>South Africa</option>"));
        assert!(html.contains("name=\"termsAndConditions\" value=\"on\" checked"));
    }
}
