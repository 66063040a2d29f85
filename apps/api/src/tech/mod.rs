//! Technology keyword extraction — fixed term table matched against
//! lower-cased text with word-boundary checks, plus a multi-word alias table
//! for spellings like "node.js" and "ruby on rails". Fully local.

pub mod handlers;

use std::collections::BTreeSet;

/// Canonical lowercase technology terms. Matched with word boundaries.
const TECH_TERMS: &[&str] = &[
    // Programming languages
    "python",
    "java",
    "javascript",
    "typescript",
    "c",
    "c++",
    "c#",
    "csharp",
    "php",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "scala",
    "r",
    "matlab",
    "perl",
    "lua",
    "haskell",
    "clojure",
    "erlang",
    "elixir",
    "dart",
    "julia",
    "bash",
    "powershell",
    "sql",
    "html",
    "css",
    // Web frameworks and libraries
    "react",
    "angular",
    "vue",
    "django",
    "flask",
    "fastapi",
    "express",
    "nodejs",
    "spring",
    "springboot",
    "laravel",
    "symfony",
    "rails",
    "blazor",
    "nextjs",
    "nuxtjs",
    "gatsby",
    "svelte",
    "ember",
    "jquery",
    "bootstrap",
    "tailwind",
    "redux",
    "rxjs",
    // Backend and API
    "graphql",
    "rest",
    "grpc",
    "soap",
    "websocket",
    "socketio",
    "fastify",
    "koa",
    "nestjs",
    // Databases
    "mysql",
    "postgresql",
    "postgres",
    "sqlite",
    "mongodb",
    "redis",
    "cassandra",
    "dynamodb",
    "elasticsearch",
    "solr",
    "neo4j",
    "couchdb",
    "influxdb",
    "mariadb",
    "oracle",
    "sqlserver",
    "firestore",
    "supabase",
    // Cloud platforms
    "aws",
    "azure",
    "gcp",
    "heroku",
    "vercel",
    "netlify",
    "digitalocean",
    "cloudflare",
    "firebase",
    // DevOps and infrastructure
    "docker",
    "kubernetes",
    "k8s",
    "terraform",
    "ansible",
    "puppet",
    "chef",
    "jenkins",
    "circleci",
    "gitlab",
    "github",
    "bitbucket",
    "helm",
    "istio",
    "prometheus",
    "grafana",
    "logstash",
    "kibana",
    "datadog",
    "sentry",
    // Machine learning and AI
    "tensorflow",
    "pytorch",
    "keras",
    "sklearn",
    "pandas",
    "numpy",
    "matplotlib",
    "jupyter",
    "opencv",
    "nltk",
    "spacy",
    "huggingface",
    "transformers",
    "bert",
    "gpt",
    // Mobile
    "android",
    "ios",
    "flutter",
    "xamarin",
    "ionic",
    "expo",
    // Testing
    "jest",
    "mocha",
    "cypress",
    "selenium",
    "pytest",
    "junit",
    "rspec",
    "jasmine",
    // Build tools and package managers
    "webpack",
    "vite",
    "rollup",
    "gulp",
    "npm",
    "yarn",
    "pnpm",
    "pip",
    "maven",
    "gradle",
    // Messaging and data infrastructure
    "nginx",
    "apache",
    "rabbitmq",
    "kafka",
    "spark",
    "hadoop",
    "airflow",
    "celery",
    // Version control and misc
    "git",
    "svn",
    "swagger",
    "openapi",
    "postman",
    "figma",
];

/// Spelling variants mapped to their canonical term. Plain substring match —
/// the variants are distinctive enough not to need boundaries.
const ALIASES: &[(&str, &str)] = &[
    ("node.js", "nodejs"),
    ("node js", "nodejs"),
    ("react.js", "react"),
    ("vue.js", "vue"),
    ("angular.js", "angular"),
    ("express.js", "express"),
    ("next.js", "nextjs"),
    ("nuxt.js", "nuxtjs"),
    ("ruby on rails", "rails"),
    ("c#", "csharp"),
    ("google cloud platform", "gcp"),
    ("google cloud", "gcp"),
    ("amazon web services", "aws"),
    ("microsoft azure", "azure"),
    ("sql server", "sqlserver"),
    ("scikit-learn", "sklearn"),
    ("scikit learn", "sklearn"),
    ("socket.io", "socketio"),
];

/// Returns the set of technology terms mentioned in `text`, lower-cased and
/// canonicalized. Ordered for deterministic output.
pub fn extract_tech(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    let mut found = BTreeSet::new();

    for &term in TECH_TERMS {
        if has_bounded_match(&text_lower, term) {
            found.insert(term.to_string());
        }
    }

    for &(variant, canonical) in ALIASES {
        if text_lower.contains(variant) {
            found.insert(canonical.to_string());
        }
    }

    found
}

/// Substring match where both neighbors are non-alphanumeric, so "java" does
/// not fire inside "javascript". Checks every occurrence, not just the first.
fn has_bounded_match(text: &str, term: &str) -> bool {
    let mut start = 0;
    while let Some(offset) = text[start..].find(term) {
        let pos = start + offset;
        let end = pos + term.len();

        let before_ok = text[..pos].chars().next_back().is_none_or(|c| !c.is_alphanumeric());
        let after_ok = text[end..].chars().next().is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }

        start = end;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(terms: &[&str]) -> BTreeSet<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_extract_tech_job_posting() {
        let found = extract_tech("Backend role: Python/Django with PostgreSQL");
        assert_eq!(found, set(&["django", "postgresql", "python"]));
    }

    #[test]
    fn test_extract_tech_word_boundaries() {
        // "javascript" must not also produce "java", and "postgresql" must
        // not produce "sql".
        let found = extract_tech("Senior JavaScript engineer");
        assert!(found.contains("javascript"));
        assert!(!found.contains("java"));
    }

    #[test]
    fn test_extract_tech_aliases() {
        let found = extract_tech("Stack: Node.js, React.js and Ruby on Rails");
        assert!(found.contains("nodejs"));
        assert!(found.contains("react"));
        assert!(found.contains("rails"));
        assert!(found.contains("ruby"));
    }

    #[test]
    fn test_extract_tech_case_insensitive() {
        let found = extract_tech("DOCKER and Kubernetes on AWS");
        assert_eq!(found, set(&["aws", "docker", "kubernetes"]));
    }

    #[test]
    fn test_extract_tech_symbol_terms() {
        let found = extract_tech("We use C++ and C# daily");
        assert!(found.contains("c++"));
        assert!(found.contains("csharp"));
    }

    #[test]
    fn test_extract_tech_empty_input() {
        assert!(extract_tech("").is_empty());
        assert!(extract_tech("We enjoy long walks on the beach").is_empty());
    }
}
