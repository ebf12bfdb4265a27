/// Daily ceilings for one crawl run.
#[derive(Debug, Clone, Copy)]
pub struct QuotaCeilings {
    pub max_leads: u32,
    pub max_connections: u32,
    pub max_comments: u32,
    pub max_messages: u32,
}

impl Default for QuotaCeilings {
    fn default() -> Self {
        QuotaCeilings {
            max_leads: 50,
            max_connections: 20,
            max_comments: 10,
            max_messages: 10,
        }
    }
}

/// Per-run action counters. Owned by the single crawl worker; only it ever
/// increments them, so no synchronization is needed within a run.
#[derive(Debug, Clone)]
pub struct QuotaCounters {
    ceilings: QuotaCeilings,
    pub leads_collected: u32,
    pub connections_sent: u32,
    pub comments_left: u32,
    pub messages_sent: u32,
}

impl QuotaCounters {
    pub fn new(ceilings: QuotaCeilings) -> Self {
        QuotaCounters {
            ceilings,
            leads_collected: 0,
            connections_sent: 0,
            comments_left: 0,
            messages_sent: 0,
        }
    }

    pub fn ceilings(&self) -> QuotaCeilings {
        self.ceilings
    }

    pub fn can_collect_lead(&self) -> bool {
        self.leads_collected < self.ceilings.max_leads
    }

    pub fn record_lead(&mut self) {
        self.leads_collected += 1;
    }

    pub fn can_connect(&self) -> bool {
        self.connections_sent < self.ceilings.max_connections
    }

    pub fn record_connection(&mut self) {
        self.connections_sent += 1;
    }

    pub fn can_comment(&self) -> bool {
        self.comments_left < self.ceilings.max_comments
    }

    pub fn record_comment(&mut self) {
        self.comments_left += 1;
    }

    pub fn can_message(&self) -> bool {
        self.messages_sent < self.ceilings.max_messages
    }

    pub fn record_message(&mut self) {
        self.messages_sent += 1;
    }
}
